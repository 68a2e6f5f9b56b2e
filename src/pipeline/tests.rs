#![expect(
    clippy::unwrap_used,
    clippy::panic,
    clippy::expect_used,
    clippy::indexing_slicing
)]
use super::*;
use crate::config::PipelineConfig;
use anyhow::Result;
use polars::prelude::*;
// polars' prelude exports its own `NullStrategy`
use super::types::NullStrategy;

fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series().clone();
    Ok(series.f64()?.into_iter().collect())
}

fn survey() -> Result<DataFrame> {
    Ok(df!(
        "edad" => [Some(25.0), Some(30.0), None, Some(35.0)],
        "ciudad" => [Some("Quito"), Some("Cuenca"), Some("Quito"), None],
    )?)
}

// --- construction ---

#[test]
fn test_pipeline_copies_input() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.handle_nulls(NullStrategy::Drop, None, None)?;

    assert_eq!(pipeline.shape(), (2, 2));
    assert_eq!(df.shape(), (4, 2), "Input table must not change");
    assert_eq!(pipeline.original_shape(), (4, 2));
    Ok(())
}

#[test]
fn test_summary_tracks_shapes_and_log() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    pipeline
        .handle_nulls(NullStrategy::Drop, None, None)?
        .encode_categoricals(&["ciudad"], EncodingMethod::OneHot)?;

    let summary = pipeline.summary();
    assert_eq!(summary.original_shape, (4, 2));
    assert_eq!(summary.final_shape, pipeline.shape());
    assert_eq!(summary.rows_removed, 2);
    // ciudad replaced by ciudad_Cuenca and ciudad_Quito
    assert_eq!(summary.columns_added, 1);
    assert_eq!(summary.transformations.len(), 2);
    assert_eq!(summary.transformations, pipeline.log());
    Ok(())
}

// --- nulls ---

#[test]
fn test_mean_fill_keeps_rows() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.handle_nulls(NullStrategy::Mean, Some(&["edad"]), None)?;

    let out = pipeline.dataframe();
    assert_eq!(out.height(), 4);
    assert_eq!(out.column("edad")?.null_count(), 0);
    assert_eq!(f64_values(out, "edad")?[2], Some(30.0));
    assert_eq!(out.column("ciudad")?.null_count(), 1, "Other columns untouched");
    assert_eq!(pipeline.log().len(), 1);
    Ok(())
}

#[test]
fn test_mean_fill_skips_implicit_text_columns() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::with_config(
        &df,
        PipelineConfig {
            suppress_warnings: true,
        },
    );
    pipeline.handle_nulls(NullStrategy::Median, None, None)?;

    let out = pipeline.dataframe();
    assert_eq!(out.column("edad")?.null_count(), 0);
    assert_eq!(out.column("ciudad")?.null_count(), 1);
    assert!(pipeline.log()[0].contains("edad"));
    assert!(!pipeline.log()[0].contains("ciudad"));
    Ok(())
}

#[test]
fn test_mean_fill_rejects_explicit_text_column() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    let err = pipeline
        .handle_nulls(NullStrategy::Mean, Some(&["ciudad"]), None)
        .err();

    assert!(matches!(err, Some(PrepError::NonNumericColumn { column, .. }) if column == "ciudad"));
    assert!(pipeline.log().is_empty());
    Ok(())
}

#[test]
fn test_drop_nulls_subset() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.handle_nulls(NullStrategy::Drop, Some(&["edad"]), None)?;

    assert_eq!(pipeline.shape(), (3, 2));
    assert_eq!(pipeline.log(), ["Removed 1 rows with null values"]);
    Ok(())
}

#[test]
fn test_empty_column_list_targets_every_column() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.handle_nulls(NullStrategy::Drop, Some(&[]), None)?;

    assert_eq!(pipeline.shape(), (2, 2));
    assert!(pipeline.detect_nulls().is_empty());
    Ok(())
}

#[test]
fn test_constant_fill_requires_value() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    let err = pipeline
        .handle_nulls(NullStrategy::Constant, None, None)
        .err();

    assert!(matches!(err, Some(PrepError::MissingFillValue)));
    assert!(pipeline.log().is_empty());
    assert_eq!(pipeline.dataframe().column("edad")?.null_count(), 1);
    Ok(())
}

#[test]
fn test_constant_fill_text() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.handle_nulls(
        NullStrategy::Constant,
        Some(&["ciudad"]),
        Some(FillValue::from("Desconocida")),
    )?;

    let out = pipeline.dataframe();
    let ciudad = out.column("ciudad")?.as_materialized_series().clone();
    assert_eq!(ciudad.str()?.get(3), Some("Desconocida"));
    assert!(pipeline.log()[0].contains("Desconocida"));
    Ok(())
}

#[test]
fn test_mode_fill_prefers_smallest_on_tie() -> Result<()> {
    let df = df!("x" => [Some(3i64), Some(1), Some(3), Some(1), None])?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.handle_nulls(NullStrategy::Mode, None, None)?;

    let x = pipeline.dataframe().column("x")?.as_materialized_series().clone();
    assert_eq!(x.i64()?.get(4), Some(1));
    Ok(())
}

#[test]
fn test_directional_fill_leaves_edges() -> Result<()> {
    let df = df!("x" => [None, Some(1.0), None, Some(3.0), None])?;

    let mut forward = Pipeline::new(&df);
    forward.handle_nulls(NullStrategy::ForwardFill, None, None)?;
    assert_eq!(
        f64_values(forward.dataframe(), "x")?,
        [None, Some(1.0), Some(1.0), Some(3.0), Some(3.0)]
    );

    let mut backward = Pipeline::new(&df);
    backward.handle_nulls(NullStrategy::BackwardFill, None, None)?;
    assert_eq!(
        f64_values(backward.dataframe(), "x")?,
        [Some(1.0), Some(1.0), Some(3.0), Some(3.0), None]
    );
    Ok(())
}

#[test]
fn test_unknown_column_is_reported() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    let err = pipeline
        .handle_nulls(NullStrategy::Drop, Some(&["salario"]), None)
        .err();

    assert!(matches!(err, Some(PrepError::ColumnNotFound(name)) if name == "salario"));
    Ok(())
}

// --- duplicates ---

#[test]
fn test_single_duplicate_removed() -> Result<()> {
    let df = df!(
        "a" => [1, 1, 2],
        "b" => ["x", "x", "y"],
    )?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.drop_duplicates(None, KeepStrategy::First)?;

    assert_eq!(pipeline.shape(), (2, 2));
    assert_eq!(pipeline.log(), ["1 duplicate row removed"]);

    // A second pass finds nothing
    pipeline.drop_duplicates(None, KeepStrategy::First)?;
    assert_eq!(pipeline.shape(), (2, 2));
    assert_eq!(pipeline.log()[1], "0 duplicate rows removed");
    Ok(())
}

#[test]
fn test_drop_duplicates_keep_last_on_subset() -> Result<()> {
    let df = df!(
        "id" => [1, 1, 2],
        "estado" => ["viejo", "nuevo", "unico"],
    )?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.drop_duplicates(Some(&["id"]), KeepStrategy::Last)?;

    let estado = pipeline
        .dataframe()
        .column("estado")?
        .as_materialized_series()
        .clone();
    let values: Vec<Option<&str>> = estado.str()?.into_iter().collect();
    assert_eq!(values, [Some("nuevo"), Some("unico")]);
    Ok(())
}

#[test]
fn test_drop_duplicates_keep_none() -> Result<()> {
    let df = df!("a" => [1, 1, 2])?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.drop_duplicates(None, KeepStrategy::None)?;

    assert_eq!(pipeline.shape(), (1, 1));
    assert_eq!(pipeline.log(), ["2 duplicate rows removed"]);
    Ok(())
}

// --- scaling ---

#[test]
fn test_standard_scaling() -> Result<()> {
    let df = df!("x" => [1.0, 2.0, 3.0, 4.0, 5.0])?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.normalize(&["x"], ScalingMethod::Standard)?;

    let series = pipeline.dataframe().column("x")?.as_materialized_series().clone();
    let ca = series.f64()?;
    assert!(ca.mean().unwrap().abs() < 1e-9);
    assert!((ca.std(0).unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(pipeline.log(), ["Applied standard scaling to [\"x\"]"]);
    Ok(())
}

#[test]
fn test_minmax_scaling_range() -> Result<()> {
    let df = df!(
        "x" => [Some(10), None, Some(20), Some(15)],
        "k" => [5.0, 5.0, 5.0, 5.0],
    )?;
    let mut pipeline = Pipeline::with_config(
        &df,
        PipelineConfig {
            suppress_warnings: true,
        },
    );
    pipeline.normalize(&["x", "k"], ScalingMethod::MinMax)?;

    let out = pipeline.dataframe();
    assert_eq!(
        f64_values(out, "x")?,
        [Some(0.0), None, Some(1.0), Some(0.5)]
    );
    assert_eq!(f64_values(out, "k")?, [Some(0.0); 4]);
    Ok(())
}

#[test]
fn test_normalize_text_column_fails_atomically() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    let err = pipeline
        .normalize(&["edad", "ciudad"], ScalingMethod::Standard)
        .err();

    assert!(matches!(err, Some(PrepError::NonNumericColumn { .. })));
    assert_eq!(f64_values(pipeline.dataframe(), "edad")?, f64_values(&df, "edad")?);
    assert!(pipeline.log().is_empty());
    Ok(())
}

// --- encoding ---

#[test]
fn test_label_encoding_sorted_codes() -> Result<()> {
    let df = df!("talla" => [Some("m"), None, Some("l"), Some("m")])?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.encode_categoricals(&["talla"], EncodingMethod::Label)?;

    let talla = pipeline
        .dataframe()
        .column("talla")?
        .as_materialized_series()
        .clone();
    let codes: Vec<Option<i64>> = talla.i64()?.into_iter().collect();
    // l < m < "null"
    assert_eq!(codes, [Some(1), Some(2), Some(0), Some(1)]);
    Ok(())
}

#[test]
fn test_one_hot_one_true_per_row() -> Result<()> {
    let df = df!(
        "id" => [1, 2, 3, 4],
        "ciudad" => ["Quito", "Cuenca", "Quito", "Loja"],
    )?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.encode_categoricals(&["ciudad"], EncodingMethod::OneHot)?;

    let out = pipeline.dataframe();
    let names: Vec<String> = column_names(out);
    assert_eq!(names, ["id", "ciudad_Cuenca", "ciudad_Loja", "ciudad_Quito"]);

    for row in 0..out.height() {
        let mut hits = 0;
        for name in &names[1..] {
            let series = out.column(name)?.as_materialized_series().clone();
            if series.bool()?.get(row) == Some(true) {
                hits += 1;
            }
        }
        assert_eq!(hits, 1, "Row {row} should have exactly one indicator");
    }
    Ok(())
}

#[test]
fn test_one_hot_null_row_has_no_indicator() -> Result<()> {
    let df = survey()?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.encode_categoricals(&["ciudad"], EncodingMethod::OneHot)?;

    let out = pipeline.dataframe();
    for name in ["ciudad_Cuenca", "ciudad_Quito"] {
        let series = out.column(name)?.as_materialized_series().clone();
        assert_eq!(series.bool()?.get(3), Some(false));
    }
    Ok(())
}

// --- outliers ---

#[test]
fn test_detect_outliers_iqr() -> Result<()> {
    let df = df!("v" => [1.0, 2.0, 3.0, 4.0, 100.0])?;
    let pipeline = Pipeline::new(&df);
    let reports = pipeline.detect_outliers(&["v"], OutlierMethod::Iqr)?;

    assert_eq!(
        reports,
        [OutlierReport {
            column: "v".to_owned(),
            outlier_count: 1,
            percentage: 20.0,
        }]
    );
    assert!(pipeline.log().is_empty(), "Detection does not log");
    Ok(())
}

#[test]
fn test_remove_outliers_sequential() -> Result<()> {
    let df = df!(
        "a" => [1.0, 2.0, 3.0, 4.0, 100.0, 3.0],
        "b" => [1.0, 2.0, 3.0, 100.0, 2.0, 3.0],
    )?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.remove_outliers(&["a", "b"], OutlierMethod::Iqr)?;

    // a drops the 100 row, then b (bounds over the survivors) drops its 100
    assert_eq!(f64_values(pipeline.dataframe(), "a")?, [Some(1.0), Some(2.0), Some(3.0), Some(3.0)]);
    assert_eq!(
        pipeline.log(),
        ["Removed 2 outliers using the iqr method in [\"a\", \"b\"]"]
    );
    Ok(())
}

#[test]
fn test_zscore_constant_column_keeps_rows() -> Result<()> {
    let df = df!("v" => [5.0, 5.0, 5.0])?;
    let mut pipeline = Pipeline::with_config(
        &df,
        PipelineConfig {
            suppress_warnings: true,
        },
    );
    pipeline.remove_outliers(&["v"], OutlierMethod::Zscore)?;
    assert_eq!(pipeline.shape(), (3, 1));
    Ok(())
}

#[test]
fn test_detect_outliers_zscore() -> Result<()> {
    let values: Vec<f64> = (0..20).map(f64::from).chain([1000.0]).collect();
    let df = df!("v" => values)?;
    let pipeline = Pipeline::new(&df);
    let reports = pipeline.detect_outliers(&["v"], OutlierMethod::Zscore)?;

    assert_eq!(reports[0].outlier_count, 1);
    assert_eq!(reports[0].percentage, 4.76);
    Ok(())
}

#[test]
fn test_remove_outliers_zscore() -> Result<()> {
    let values: Vec<f64> = (0..20).map(f64::from).chain([1000.0]).collect();
    let df = df!("v" => values)?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.remove_outliers(&["v"], OutlierMethod::Zscore)?;

    assert_eq!(pipeline.shape(), (20, 1));
    let series = pipeline.dataframe().column("v")?.as_materialized_series().clone();
    assert_eq!(series.f64()?.max(), Some(19.0));
    Ok(())
}

#[test]
fn test_detect_outliers_rejects_text_column() -> Result<()> {
    let df = survey()?;
    let err = Pipeline::new(&df)
        .detect_outliers(&["ciudad"], OutlierMethod::Iqr)
        .err();

    assert!(matches!(
        err,
        Some(PrepError::NonNumericColumn { column, .. }) if column == "ciudad"
    ));
    Ok(())
}

#[test]
fn test_remove_outliers_drops_null_rows() -> Result<()> {
    let df = df!("v" => [Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)])?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.remove_outliers(&["v"], OutlierMethod::Iqr)?;

    assert_eq!(
        f64_values(pipeline.dataframe(), "v")?,
        [Some(1.0), Some(2.0), Some(3.0), Some(4.0)]
    );
    assert_eq!(
        pipeline.log(),
        ["Removed 1 outliers using the iqr method in [\"v\"]"]
    );
    Ok(())
}

// --- types ---

#[test]
fn test_convert_types() -> Result<()> {
    let df = df!(
        "edad" => ["25", "30", "41"],
        "activo" => [Some("YES"), None, Some("0")],
        "peso" => [70, 80, 90],
    )?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.convert_types([
        ("edad", TargetType::Int64),
        ("activo", TargetType::Boolean),
        ("peso", TargetType::Float64),
    ])?;

    let out = pipeline.dataframe();
    assert_eq!(out.column("edad")?.dtype(), &DataType::Int64);
    assert_eq!(out.column("peso")?.dtype(), &DataType::Float64);

    let activo = out.column("activo")?.as_materialized_series().clone();
    let activo: Vec<Option<bool>> = activo.bool()?.into_iter().collect();
    assert_eq!(activo, [Some(true), None, Some(false)]);

    assert_eq!(
        pipeline.log(),
        ["Converted column types: {edad: int64, activo: boolean, peso: float64}"]
    );
    Ok(())
}

#[test]
fn test_convert_unrecognised_boolean_text_fails() -> Result<()> {
    let df = df!("activo" => ["si", "no"])?;
    let mut pipeline = Pipeline::new(&df);
    let err = pipeline
        .convert_types([("activo", TargetType::Boolean)])
        .err();

    assert!(matches!(
        err,
        Some(PrepError::TypeConversionFailure { reason, .. }) if reason.contains("'si'")
    ));
    Ok(())
}

#[test]
fn test_convert_strings_to_date() -> Result<()> {
    let df = df!("fecha" => [Some("2024-01-15"), None, Some("2023-12-31")])?;
    let mut pipeline = Pipeline::new(&df);
    pipeline.convert_types([("fecha", TargetType::Date)])?;

    let fecha = pipeline.dataframe().column("fecha")?;
    assert_eq!(fecha.dtype(), &DataType::Date);
    assert_eq!(fecha.null_count(), 1);
    Ok(())
}

#[test]
fn test_convert_fractional_floats_to_int_fails() -> Result<()> {
    let df = df!("peso" => [1.5, 2.0])?;
    let mut pipeline = Pipeline::new(&df);
    let err = pipeline.convert_types([("peso", TargetType::Int64)]).err();

    assert!(matches!(
        err,
        Some(PrepError::TypeConversionFailure { column, .. }) if column == "peso"
    ));
    assert_eq!(pipeline.dataframe().column("peso")?.dtype(), &DataType::Float64);
    Ok(())
}

#[test]
fn test_convert_types_failure_changes_nothing() -> Result<()> {
    let df = df!(
        "ok" => ["1", "2", "3"],
        "bad" => ["1", "2", "tres"],
    )?;
    let mut pipeline = Pipeline::new(&df);
    let err = pipeline
        .convert_types([("ok", TargetType::Int64), ("bad", TargetType::Int64)])
        .err();

    assert!(matches!(
        err,
        Some(PrepError::TypeConversionFailure { column, .. }) if column == "bad"
    ));
    assert_eq!(pipeline.dataframe().column("ok")?.dtype(), &DataType::String);
    assert!(pipeline.log().is_empty());
    Ok(())
}

// --- inspection ---

#[test]
fn test_info_counts_duplicates() -> Result<()> {
    let df = df!(
        "a" => [1, 1, 1, 2],
        "b" => ["x", "x", "x", "y"],
    )?;
    let info = Pipeline::new(&df).info()?;

    assert_eq!(info.shape, (4, 2));
    assert_eq!(info.duplicate_rows, 2);
    assert_eq!(info.column_names(), ["a", "b"]);
    assert!(info.memory_mb >= 0.0);
    Ok(())
}

#[test]
fn test_detect_nulls_sorted_descending() -> Result<()> {
    let df = df!(
        "few" => [Some(1), Some(2), None, Some(4)],
        "none" => [1, 2, 3, 4],
        "many" => [None, None, Some(3), None],
    )?;
    let reports = Pipeline::new(&df).detect_nulls();

    assert_eq!(
        reports,
        [
            NullReport {
                column: "many".to_owned(),
                null_count: 3,
                null_percentage: 75.0,
            },
            NullReport {
                column: "few".to_owned(),
                null_count: 1,
                null_percentage: 25.0,
            },
        ]
    );
    Ok(())
}

#[test]
fn test_operations_on_empty_table() -> Result<()> {
    let df = DataFrame::empty();
    let mut pipeline = Pipeline::new(&df);
    pipeline
        .handle_nulls(NullStrategy::Drop, None, None)?
        .drop_duplicates(None, KeepStrategy::First)?;

    assert_eq!(pipeline.shape(), (0, 0));
    assert!(pipeline.detect_nulls().is_empty());
    assert_eq!(pipeline.info()?.duplicate_rows, 0);
    Ok(())
}
