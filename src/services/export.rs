//! Spreadsheet export of rental records

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::{
    error::AppResult,
    models::{AuthContext, Capability, RentalDetails},
    repository::RentalStore,
};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Book Rentals";
const RETURNED_SECTION_TITLE: &str = "Returned Rentals";
const MISSING: &str = "N/A";

pub const HEADER: [&str; 7] = [
    "ID",
    "Book Title",
    "Customer Name",
    "Rent Start Date",
    "Rent End Date",
    "Quantity",
    "Price",
];

/// One rental rendered as spreadsheet cells
#[derive(Debug, Clone, PartialEq)]
pub struct RentalRow {
    pub id: String,
    pub book_title: String,
    pub customer_name: String,
    pub start_date: String,
    pub end_date: String,
    pub quantity: i32,
    pub price: f64,
}

impl From<&RentalDetails> for RentalRow {
    fn from(details: &RentalDetails) -> Self {
        let rental = &details.rental;
        RentalRow {
            id: rental.id.to_string(),
            book_title: details
                .book
                .as_ref()
                .map(|b| b.title.clone())
                .unwrap_or_else(|| MISSING.to_string()),
            customer_name: details
                .customer
                .as_ref()
                .map(|c| c.display_name().to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            start_date: rental.rent_start_date.format("%Y-%m-%d").to_string(),
            end_date: rental.rent_end_date.format("%Y-%m-%d").to_string(),
            quantity: rental.quantity,
            price: rental.price.to_f64().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SheetRow {
    Header,
    Title(String),
    Blank,
    Rental(RentalRow),
}

/// Row layout of the export sheet, computed before any bytes are written
#[derive(Debug, Clone, Default)]
pub struct RentalSheet {
    rows: Vec<SheetRow>,
}

impl RentalSheet {
    /// Active rentals first; returned rentals, if given, follow in their own
    /// titled section with the same header.
    pub fn new(rentals: &[RentalDetails], returned: Option<&[RentalDetails]>) -> Self {
        let mut rows = Vec::with_capacity(rentals.len() + 1);
        rows.push(SheetRow::Header);
        rows.extend(rentals.iter().map(|r| SheetRow::Rental(r.into())));

        if let Some(returned) = returned {
            rows.push(SheetRow::Blank);
            rows.push(SheetRow::Title(RETURNED_SECTION_TITLE.to_string()));
            rows.push(SheetRow::Header);
            rows.extend(returned.iter().map(|r| SheetRow::Rental(r.into())));
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn rental_rows(&self) -> impl Iterator<Item = &RentalRow> {
        self.rows.iter().filter_map(|row| match row {
            SheetRow::Rental(r) => Some(r),
            _ => None,
        })
    }

    /// Render the layout as an `.xlsx` document
    pub fn to_xlsx(&self) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SHEET_NAME)?;

            for (index, row) in self.rows.iter().enumerate() {
                let line = index as u32;
                match row {
                    SheetRow::Header => {
                        for (col, title) in HEADER.iter().enumerate() {
                            worksheet.write_string_with_format(line, col as u16, *title, &bold)?;
                        }
                    }
                    SheetRow::Title(title) => {
                        worksheet.write_string_with_format(line, 0, title.as_str(), &bold)?;
                    }
                    SheetRow::Blank => {}
                    SheetRow::Rental(r) => {
                        worksheet.write_string(line, 0, r.id.as_str())?;
                        worksheet.write_string(line, 1, r.book_title.as_str())?;
                        worksheet.write_string(line, 2, r.customer_name.as_str())?;
                        worksheet.write_string(line, 3, r.start_date.as_str())?;
                        worksheet.write_string(line, 4, r.end_date.as_str())?;
                        worksheet.write_number(line, 5, r.quantity)?;
                        worksheet.write_number(line, 6, r.price)?;
                    }
                }
            }

            worksheet.autofit();
        }

        workbook.save_to_buffer()
    }
}

/// `BookRentals_<yyyyMMddHHmmss>.xlsx`
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("BookRentals_{}.xlsx", at.format("%Y%m%d%H%M%S"))
}

/// A rendered export ready to be sent as a download
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Clone)]
pub struct ExportService {
    rentals: Arc<dyn RentalStore>,
}

impl ExportService {
    pub fn new(rentals: Arc<dyn RentalStore>) -> Self {
        Self { rentals }
    }

    /// Snapshot of the active rentals; open to any caller
    pub async fn export_active(&self) -> AppResult<ExportFile> {
        let rentals = self.rentals.list_details().await?;
        let sheet = RentalSheet::new(&rentals, None);
        self.render(&sheet)
    }

    /// Active rentals followed by the returned rentals history
    pub async fn export_report(&self, auth: &AuthContext) -> AppResult<ExportFile> {
        auth.require(Capability::ExportReports)?;

        let rentals = self.rentals.list_details().await?;
        let returned = self.rentals.list_returned().await?;
        let sheet = RentalSheet::new(&rentals, Some(&returned));
        self.render(&sheet)
    }

    fn render(&self, sheet: &RentalSheet) -> AppResult<ExportFile> {
        let content = sheet.to_xlsx()?;
        let file_name = export_file_name(Utc::now());

        tracing::info!(
            file_name = %file_name,
            rows = sheet.rental_rows().count(),
            bytes = content.len(),
            "Rentals exported"
        );

        Ok(ExportFile { file_name, content })
    }
}
