use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use prisoner_core::eval::{ArbitrationPosterior, SpreadTable};
use prisoner_core::model::color::Color;
use prisoner_core::model::priors::{PriorConfig, Variant};
use prisoner_core::model::shape::Shape;
use serde::Serialize;

use super::RunnerError;

/// Every arbitration row for the configured priors, per universe.
#[derive(Debug, Serialize)]
pub struct ArbitrationExport {
    pub colors: Vec<ArbitrationPosterior<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<ArbitrationPosterior<Shape>>>,
}

impl ArbitrationExport {
    pub fn build(priors: &PriorConfig, variant: Variant) -> Result<Self, RunnerError> {
        let colors = SpreadTable::new(priors.color_set()?)?.rows()?;
        let shapes = if variant.has_shapes() {
            Some(SpreadTable::new(priors.shape_set()?)?.rows()?)
        } else {
            None
        };
        Ok(Self { colors, shapes })
    }

    pub fn write(&self, path: &Path) -> Result<(), RunnerError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
