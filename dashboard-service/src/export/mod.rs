use plant_data::domain::{Dataset, PowerPlant};

/// Serialize `records` back to UTF-8 CSV using the dataset's original header,
/// pass-through columns included, with rows ordered by capacity descending.
pub fn to_csv_bytes(dataset: &Dataset, records: &[&PowerPlant]) -> Result<Vec<u8>, csv::Error> {
    let mut ordered: Vec<&PowerPlant> = records.to_vec();
    ordered.sort_by(|a, b| b.capacity_mw.total_cmp(&a.capacity_mw));

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&dataset.columns)?;
    for plant in &ordered {
        wtr.write_record(&plant.raw)?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}
