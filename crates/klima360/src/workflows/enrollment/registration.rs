use chrono::NaiveDate;

use super::domain::{AgentId, Farmer, FarmerId, FarmerRegistration};

/// Validation errors raised before a farmer is stored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationViolation {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("farm size must be a positive number of acres (found {0})")]
    InvalidFarmSize(f64),
}

fn required(value: String, field: &'static str) -> Result<String, RegistrationViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationViolation::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Turn a registration form into an unassessed farmer record.
pub(crate) fn farmer_from_registration<B>(
    registration: FarmerRegistration,
    id: FarmerId,
    today: NaiveDate,
) -> Result<Farmer<B>, RegistrationViolation> {
    let name = required(registration.name, "name")?;
    let phone = required(registration.phone, "phone")?;
    let county = required(registration.county, "county")?;
    let village = required(registration.village, "village")?;
    let agent_id = required(registration.agent_id.0, "agent_id")?;

    if !registration.farm_size.is_finite() || registration.farm_size <= 0.0 {
        return Err(RegistrationViolation::InvalidFarmSize(
            registration.farm_size,
        ));
    }

    let main_crops = registration
        .main_crops
        .into_iter()
        .map(|crop| crop.trim().to_string())
        .filter(|crop| !crop.is_empty())
        .collect();

    Ok(Farmer {
        id,
        name,
        phone,
        county,
        sub_county: optional(registration.sub_county),
        village,
        gps_coordinates: registration.gps_coordinates,
        farm_size: registration.farm_size,
        farming_type: registration.farming_type,
        main_crops,
        date_enrolled: registration.date_enrolled.unwrap_or(today),
        agent_id: AgentId(agent_id),
        agent_name: registration.agent_name.trim().to_string(),
        assessment: None,
    })
}
