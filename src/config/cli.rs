use crate::domain::model::{Area, Specialty};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_xlsx_extension, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn parse_area(s: &str) -> Result<Area> {
    s.parse()
}

fn parse_specialty(s: &str) -> Result<Specialty> {
    s.parse()
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "clinic-finder")]
#[command(about = "Search doctors and clinics in Pune and export them to a spreadsheet")]
pub struct CliConfig {
    /// Areas to search, comma separated (default: all supported areas)
    #[arg(long, value_delimiter = ',', value_parser = parse_area)]
    pub areas: Vec<Area>,

    /// Specialties to search, comma separated (default: any specialty)
    #[arg(long, value_delimiter = ',', value_parser = parse_specialty)]
    pub specialties: Vec<Specialty>,

    /// Results kept per search query (1-50)
    #[arg(long, default_value = "15")]
    pub max_results: usize,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "pune_doctors.xlsx")]
    pub file_name: String,

    /// Skip the per-place details lookup (faster, but no phone/website)
    #[arg(long)]
    pub skip_details: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn areas(&self) -> &[Area] {
        if self.areas.is_empty() {
            &Area::ALL
        } else {
            &self.areas
        }
    }

    fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    fn max_results(&self) -> usize {
        self.max_results
    }

    fn fetch_details(&self) -> bool {
        !self.skip_details
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_range("max_results", self.max_results, 1, 50)?;
        crate::utils::validation::validate_non_empty_string("output_path", &self.output_path)?;
        validate_xlsx_extension("file_name", &self.file_name)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
