//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use tracing::info;

use carprice_infer::SharedModel;
use carprice_ingest::read_csv;
use carprice_model::{BoundsConfig, FEATURE_SCHEMA, FeatureField};
use carprice_output::{display_price, round_price, write_csv};
use carprice_schema::SchemaRegistry;
use carprice_validate::RecordInput;

use carprice_cli::pipeline::{Pipeline, predict_batch};

use crate::cli::{BatchArgs, PredictArgs, SchemaArgs};

pub fn run_predict(args: &PredictArgs, data: &Path, model: &Path) -> Result<()> {
    let pipeline = Pipeline::load(data, model)?;
    let input = RecordInput {
        make: args.make.clone(),
        car_type: args.car_type.clone(),
        origin: args.origin.clone(),
        region: args.region.clone(),
        gear_type: args.gear_type.clone(),
        options: args.options.clone(),
        year: args.year,
        engine_size: args.engine_size,
        mileage: args.mileage,
    };
    let price = pipeline.predict_record(&input)?;
    if args.json {
        let payload = serde_json::json!({
            "price": round_price(price),
            "display": display_price(price),
        });
        println!("{payload}");
    } else {
        println!("Estimated price: {}", display_price(price));
    }
    Ok(())
}

pub fn run_batch(args: &BatchArgs, model_path: &Path) -> Result<()> {
    let original = read_csv(&args.input).context("read batch input")?;
    info!(
        input = %args.input.display(),
        rows = original.height(),
        "batch input loaded"
    );
    let model = SharedModel::new(model_path);
    let mut out = predict_batch(model.get()?.as_ref(), &original)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    write_csv(&mut out, &output)?;
    println!(
        "Wrote {} predictions to {}",
        out.height(),
        output.display()
    );
    Ok(())
}

pub fn run_schema(args: &SchemaArgs, data: &Path) -> Result<()> {
    let reference = read_csv(data).context("load reference dataset")?;
    let registry = SchemaRegistry::from_reference(reference);
    let bounds = BoundsConfig::default();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Kind", "Allowed values"]);
    for field in FEATURE_SCHEMA {
        table.add_row(vec![
            field.name().to_string(),
            if field.is_categorical() {
                "categorical".to_string()
            } else {
                "numeric".to_string()
            },
            describe_field(&registry, &bounds, field, args.make.as_deref())?,
        ]);
    }
    println!("{table}");
    Ok(())
}

fn describe_field(
    registry: &SchemaRegistry,
    bounds: &BoundsConfig,
    field: FeatureField,
    make: Option<&str>,
) -> Result<String> {
    let description = match field {
        FeatureField::Year => format!("{} to {}", bounds.year_min, bounds.year_max),
        FeatureField::EngineSize => {
            format!("{} to {}", bounds.engine_size_min, bounds.engine_size_max)
        }
        FeatureField::Mileage => format!(">= {}", bounds.mileage_min),
        FeatureField::Type if make.is_some() => {
            let make = make.unwrap_or_default();
            let types = registry.types_for_make(make)?;
            if types.is_empty() {
                format!("(no types observed for {make})")
            } else {
                types.join(", ")
            }
        }
        _ => match registry.domain(field) {
            Ok(values) => values.join(", "),
            Err(error) => format!("(unavailable: {error})"),
        },
    };
    Ok(description)
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "batch".to_string());
    input.with_file_name(format!("{stem}_predicted.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_the_input() {
        let path = default_output_path(Path::new("/tmp/listings.csv"));
        assert_eq!(path, Path::new("/tmp/listings_predicted.csv"));
    }
}
