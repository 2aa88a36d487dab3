use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{AgentId, Farmer};
use crate::workflows::assessment::ScoreBand;

/// Assessment-state filter applied to an agent's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandFilter<B> {
    All,
    Unscored,
    Band(B),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown band filter '{0}'")]
pub struct UnknownBandFilter(pub String);

impl<B> Default for BandFilter<B> {
    fn default() -> Self {
        Self::All
    }
}

impl<B: ScoreBand> BandFilter<B> {
    /// Accepts `all`, `unscored`, or a band key of the active scale. Blank means `all`.
    pub fn parse(raw: &str) -> Result<Self, UnknownBandFilter> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if trimmed.eq_ignore_ascii_case("unscored") {
            return Ok(Self::Unscored);
        }
        B::from_key(trimmed)
            .map(Self::Band)
            .ok_or_else(|| UnknownBandFilter(raw.to_string()))
    }

    pub fn matches(&self, farmer: &Farmer<B>) -> bool {
        match self {
            Self::All => true,
            Self::Unscored => !farmer.is_assessed(),
            Self::Band(band) => farmer.score_band() == Some(*band),
        }
    }
}

/// Filters for listing an agent's farmers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterQuery<B> {
    /// Case-insensitive over name and village, verbatim over phone.
    pub search: Option<String>,
    pub band: BandFilter<B>,
    /// Exact county match.
    pub county: Option<String>,
}

impl<B> Default for RosterQuery<B> {
    fn default() -> Self {
        Self {
            search: None,
            band: BandFilter::All,
            county: None,
        }
    }
}

impl<B: ScoreBand> RosterQuery<B> {
    pub fn matches(&self, farmer: &Farmer<B>) -> bool {
        self.matches_search(farmer) && self.band.matches(farmer) && self.matches_county(farmer)
    }

    fn matches_search(&self, farmer: &Farmer<B>) -> bool {
        let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) else {
            return true;
        };
        let needle = search.to_lowercase();
        farmer.name.to_lowercase().contains(&needle)
            || farmer.village.to_lowercase().contains(&needle)
            || farmer.phone.contains(search)
    }

    fn matches_county(&self, farmer: &Farmer<B>) -> bool {
        match self.county.as_deref() {
            None | Some("") | Some("all") => true,
            Some(county) => farmer.county == county,
        }
    }
}

/// Counts over the agent's whole roster, independent of the filters applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterSummary {
    pub total: usize,
    pub assessed: usize,
    pub pending: usize,
}

impl RosterSummary {
    pub fn from_farmers<B: Copy>(farmers: &[Farmer<B>]) -> Self {
        let assessed = farmers.iter().filter(|farmer| farmer.is_assessed()).count();
        Self {
            total: farmers.len(),
            assessed,
            pending: farmers.len() - assessed,
        }
    }
}

/// Filtered roster view for one agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRoster<B> {
    pub agent_id: AgentId,
    pub summary: RosterSummary,
    /// Distinct counties across the whole roster, sorted.
    pub counties: Vec<String>,
    pub farmers: Vec<Farmer<B>>,
}

impl<B: ScoreBand> AgentRoster<B> {
    pub(crate) fn build(agent_id: AgentId, mut all: Vec<Farmer<B>>, query: &RosterQuery<B>) -> Self {
        all.sort_by(|a, b| a.id.cmp(&b.id));

        let summary = RosterSummary::from_farmers(&all);
        let counties = all
            .iter()
            .map(|farmer| farmer.county.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let farmers = all
            .into_iter()
            .filter(|farmer| query.matches(farmer))
            .collect();

        Self {
            agent_id,
            summary,
            counties,
            farmers,
        }
    }
}
