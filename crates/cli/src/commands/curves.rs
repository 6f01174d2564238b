//! `rse curves`: list the calibration catalogue

use anyhow::Result;
use colored::Colorize;
use estimator_lib::{CalibrationStore, CurveSummary};
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{format_quantity, print_json, print_table, OutputFormat};

/// Row for the catalogue table
#[derive(Tabled)]
struct CurveRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Factor")]
    factor: String,
    #[tabled(rename = "Points")]
    points: usize,
    #[tabled(rename = "Calibrated Range")]
    range: String,
    #[tabled(rename = "Requires")]
    feature: String,
}

impl From<&CurveSummary> for CurveRow {
    fn from(curve: &CurveSummary) -> Self {
        Self {
            service: curve.service.clone(),
            factor: curve.factor.to_string(),
            points: curve.points,
            range: format!(
                "{} - {}",
                format_quantity(curve.min_value),
                format_quantity(curve.max_value)
            ),
            feature: curve
                .feature
                .map(|f| format!("{:?}", f))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub async fn run(remote: bool, api_url: &str, format: OutputFormat) -> Result<()> {
    let curves = if remote {
        ApiClient::new(api_url)?.curves().await?
    } else {
        CalibrationStore::global().summaries()
    };

    match format {
        OutputFormat::Json => print_json(&curves)?,
        OutputFormat::Table => {
            println!("{}", "Calibration Curves".bold());
            let rows: Vec<CurveRow> = curves.iter().map(CurveRow::from).collect();
            print_table(&rows);
        }
    }

    Ok(())
}
