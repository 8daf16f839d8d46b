use crate::data::HouseRecord;
use crate::domain::sectors::house_type_name;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

const HEADERS: [&str; 9] = [
    "PID",
    "Address",
    "Neighborhood",
    "Sector",
    "House Type",
    "Sale Price",
    "Year Built",
    "Latitude",
    "Longitude",
];

/// Spreadsheet of the houses listed in the sidebar selection.
pub fn export_houses_xlsx(houses: &[&HouseRecord], neighborhood: &str) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, house) in houses.iter().enumerate() {
        write_house(worksheet, (i + 1) as u32, house)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write PID {}: {}", house.pid, e)))?;
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))?;

    tracing::debug!(rows = houses.len(), neighborhood, "exported houses");
    xlsx_response(buffer, &format!("houses_{neighborhood}.xlsx"))
}

fn write_house(ws: &mut Worksheet, r: u32, house: &HouseRecord) -> Result<(), XlsxError> {
    ws.write_number(r, 0, house.pid as f64)?;
    ws.write_string(r, 1, &house.address)?;
    ws.write_string(r, 2, &house.neighborhood)?;
    ws.write_string(r, 3, house.sector.name())?;
    ws.write_string(r, 4, house_type_name(house.house_type).unwrap_or("Other"))?;
    ws.write_number(r, 5, house.sale_price)?;
    ws.write_number(r, 6, f64::from(house.year_built))?;
    ws.write_number(r, 7, house.location.latitude)?;
    ws.write_number(r, 8, house.location.longitude)?;
    Ok(())
}
