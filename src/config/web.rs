use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_xlsx_extension, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "clinic-finder-web")]
#[command(about = "Web form for searching doctors and clinics in Pune")]
pub struct WebConfig {
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "pune_doctors.xlsx")]
    pub file_name: String,

    /// Upper bound accepted from the form's results-per-search field
    #[arg(long, default_value = "50")]
    pub max_results_cap: usize,
}

impl Validate for WebConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("bind", &self.bind)?;
        crate::utils::validation::validate_non_empty_string("output_path", &self.output_path)?;
        validate_xlsx_extension("file_name", &self.file_name)?;
        validate_range("max_results_cap", self.max_results_cap, 1, 50)?;
        Ok(())
    }
}
