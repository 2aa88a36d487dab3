pub mod assessment;
pub mod enrollment;
pub mod survey;
