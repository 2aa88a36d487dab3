use crate::infra::{load_catalog, InMemoryFarmerRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use klima360::config::AppConfig;
use klima360::error::AppError;
use klima360::workflows::assessment::{
    AnswerSet, Category, CategoryAverage, Polarity, Question, ScoreBand, ScoringEngine,
    ScoringPolicy, ScoringPolicyKind, WeightedSum,
};
use klima360::workflows::enrollment::{
    AgentId, EnrollmentService, FarmerRegistration, FarmingType, RosterQuery,
};
use klima360::workflows::survey::{ScoredResponse, SurveyImporter, SurveyResponse};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV export with one row per respondent and one column per question key
    #[arg(long)]
    pub(crate) answers_csv: PathBuf,
    /// Scoring policy (defaults to APP_SCORING_POLICY, then category_average)
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) policy: Option<ScoringPolicyKind>,
    /// JSON product catalog (defaults to APP_PRODUCT_CATALOG, then the standard bundles)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Scoring policy used for the demo (defaults to category_average)
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) policy: Option<ScoringPolicyKind>,
    /// Enrollment and assessment date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let policy = args.policy.unwrap_or(config.scoring.policy);
    let catalog_path = args.catalog.or(config.scoring.catalog_path);

    let responses = SurveyImporter::from_path(&args.answers_csv)?;
    println!(
        "Scoring {} responses from {} ({policy})",
        responses.len(),
        args.answers_csv.display()
    );

    match policy {
        ScoringPolicyKind::WeightedSum => {
            score_with::<WeightedSum>(&responses, catalog_path.as_deref())
        }
        ScoringPolicyKind::CategoryAverage => {
            score_with::<CategoryAverage>(&responses, catalog_path.as_deref())
        }
    }
}

fn score_with<P: ScoringPolicy>(
    responses: &[SurveyResponse],
    catalog_path: Option<&Path>,
) -> Result<(), AppError> {
    let catalog = load_catalog::<P::Band>(catalog_path)?;
    let scored = SurveyImporter::score(responses, &ScoringEngine::new(P::default()), &catalog);
    render_scored(&scored);
    Ok(())
}

fn render_scored<B: ScoreBand>(scored: &[ScoredResponse<B>]) {
    println!(
        "{:<16} {:>5}  {:<14} {:>4} {:>4} {:>4} {:>4} {:>4}  Product",
        "Respondent", "Score", "Band", "EXP", "SEN", "ADA", "MIT", "FIN"
    );
    for entry in scored {
        let categories = &entry.result.category_scores;
        println!(
            "{:<16} {:>5}  {:<14} {:>4} {:>4} {:>4} {:>4} {:>4}  {}",
            entry.respondent,
            entry.result.total_score,
            entry.result.score_band.label(),
            categories.exposure,
            categories.sensitivity,
            categories.adaptive_capacity,
            categories.mitigation_practices,
            categories.financial_resilience,
            entry.matched_product.title,
        );
    }
}

pub(crate) fn print_questionnaire() {
    let mut number = 1;
    for category in Category::ordered() {
        println!("\n{} ({} questions)", category.label(), category.question_count());
        for spec in category.questions() {
            let favorable = match spec.polarity {
                Polarity::Protective => "yes",
                Polarity::Hazard => "no",
            };
            println!(
                "  {number:>2}. {} [{}; favorable answer: {favorable}]",
                spec.prompt, spec.key
            );
            number += 1;
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    match args.policy.unwrap_or_default() {
        ScoringPolicyKind::WeightedSum => demo_with::<WeightedSum>(today),
        ScoringPolicyKind::CategoryAverage => demo_with::<CategoryAverage>(today),
    }
}

fn sample_farmers(agent: &AgentId) -> Vec<(FarmerRegistration, AnswerSet)> {
    let base = FarmerRegistration {
        name: String::new(),
        phone: String::new(),
        county: String::new(),
        sub_county: None,
        village: String::new(),
        gps_coordinates: None,
        farm_size: 1.0,
        farming_type: FarmingType::Crop,
        main_crops: Vec::new(),
        agent_id: agent.clone(),
        agent_name: "Demo Agent".to_string(),
        date_enrolled: None,
    };

    let resilient = AnswerSet::all_favorable().with(Question::RainfallVariability, true);
    let mut mixed = AnswerSet::all_unfavorable();
    for category in Category::ordered() {
        for spec in category.questions().step_by(2) {
            mixed = mixed.with(spec.question, spec.polarity.favorable_answer());
        }
    }

    vec![
        (
            FarmerRegistration {
                name: "Wanjiku Kamau".to_string(),
                phone: "+254712000001".to_string(),
                county: "Nakuru".to_string(),
                village: "Mau Narok".to_string(),
                farm_size: 3.5,
                farming_type: FarmingType::Mixed,
                main_crops: vec!["Maize".to_string(), "Potatoes".to_string()],
                ..base.clone()
            },
            resilient,
        ),
        (
            FarmerRegistration {
                name: "Brian Mutua".to_string(),
                phone: "+254722000002".to_string(),
                county: "Machakos".to_string(),
                village: "Kangundo".to_string(),
                farm_size: 1.2,
                main_crops: vec!["Sorghum".to_string()],
                ..base.clone()
            },
            mixed,
        ),
        (
            FarmerRegistration {
                name: "Amina Wekesa".to_string(),
                phone: "+254733000003".to_string(),
                county: "Kakamega".to_string(),
                village: "Lugari".to_string(),
                farm_size: 0.8,
                farming_type: FarmingType::Livestock,
                ..base
            },
            AnswerSet::all_unfavorable(),
        ),
    ]
}

fn demo_with<P: ScoringPolicy>(today: NaiveDate) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryFarmerRepository::<P::Band>::default());
    let service: EnrollmentService<_, P> = EnrollmentService::with_standard_catalog(repository);
    let agent = AgentId("agent-demo".to_string());

    println!("Klima360 demo ({} policy)", P::KIND);
    let samples = sample_farmers(&agent);
    let mut registered = Vec::with_capacity(samples.len());
    for (registration, answers) in samples {
        let farmer = service.register(registration, today)?;
        println!("- registered {} ({}, {})", farmer.name, farmer.village, farmer.county);
        registered.push((farmer, answers));
    }

    // The last sample stays unassessed so the roster shows a pending farmer.
    let pending = registered.len() - 1;
    println!("\nAssessments");
    for (farmer, answers) in registered.iter().take(pending) {
        let assessment = service.assess(&farmer.id, answers, today)?;
        println!(
            "- {}: score {} | {} | recommended: {}",
            farmer.name,
            assessment.climate_score,
            assessment.score_band.label(),
            assessment.matched_product.title
        );
    }

    let roster = service.roster(&agent, &RosterQuery::default())?;
    println!(
        "\nRoster for {}: {} farmers | {} assessed | {} pending",
        agent.0, roster.summary.total, roster.summary.assessed, roster.summary.pending
    );
    for farmer in &roster.farmers {
        let status = match &farmer.assessment {
            Some(assessment) => format!(
                "{} ({})",
                assessment.climate_score,
                assessment.score_band.label()
            ),
            None => "not assessed".to_string(),
        };
        println!(
            "  {} | {} | {} | {:.1} acres | {}",
            farmer.id.0,
            farmer.name,
            farmer.farming_type.label(),
            farmer.farm_size,
            status
        );
    }

    Ok(())
}
