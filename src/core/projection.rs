//! Summary projection: invoice fields denormalized into queryable columns

use crate::core::patch::DottedPath;
use crate::core::record::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One denormalized summary column and the document path it is read from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryColumn {
    IssuerName,
    InvoiceNumber,
    IssueDate,
    DueDate,
    Currency,
    NetTotal,
    VatTotal,
    GrossTotal,
}

impl SummaryColumn {
    pub const ALL: [SummaryColumn; 8] = [
        SummaryColumn::IssuerName,
        SummaryColumn::InvoiceNumber,
        SummaryColumn::IssueDate,
        SummaryColumn::DueDate,
        SummaryColumn::Currency,
        SummaryColumn::NetTotal,
        SummaryColumn::VatTotal,
        SummaryColumn::GrossTotal,
    ];

    /// Storage column name
    pub fn column_name(self) -> &'static str {
        match self {
            SummaryColumn::IssuerName => "issuer_name",
            SummaryColumn::InvoiceNumber => "invoice_number",
            SummaryColumn::IssueDate => "issue_date",
            SummaryColumn::DueDate => "due_date",
            SummaryColumn::Currency => "currency",
            SummaryColumn::NetTotal => "net_total",
            SummaryColumn::VatTotal => "vat_total",
            SummaryColumn::GrossTotal => "gross_total",
        }
    }

    /// Segments of the document path the column is extracted from
    pub fn source_path(self) -> &'static [&'static str] {
        match self {
            SummaryColumn::IssuerName => &["seller", "name"],
            SummaryColumn::InvoiceNumber => &["invoice_number"],
            SummaryColumn::IssueDate => &["dates", "issue_date"],
            SummaryColumn::DueDate => &["dates", "due_date"],
            SummaryColumn::Currency => &["currency"],
            SummaryColumn::NetTotal => &["net_total"],
            SummaryColumn::VatTotal => &["vat_total"],
            SummaryColumn::GrossTotal => &["gross_total"],
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SummaryColumn::NetTotal | SummaryColumn::VatTotal | SummaryColumn::GrossTotal
        )
    }

    /// Columns whose value may change when `path` is written
    ///
    /// A write touches a column when one path is a prefix of the other:
    /// setting `dates` replaces both date columns, setting `seller.name.first`
    /// turns `seller.name` into an object.
    pub fn affected_by(path: &DottedPath) -> Vec<SummaryColumn> {
        let written: Vec<&str> = path.segments().collect();
        Self::ALL
            .into_iter()
            .filter(|column| {
                let source = column.source_path();
                let shared = source.len().min(written.len());
                source[..shared]
                    .iter()
                    .zip(&written[..shared])
                    .all(|(a, b)| a == b)
            })
            .collect()
    }
}

/// The fixed set of fields extracted from a document at write time
///
/// Missing or unusable source fields project to `""` or `0`, never absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryProjection {
    pub issuer_name: String,
    pub invoice_number: String,
    pub issue_date: String,
    pub due_date: String,
    pub currency: String,
    pub net_total: f64,
    pub vat_total: f64,
    pub gross_total: f64,
}

impl SummaryProjection {
    pub fn from_document(document: &Document) -> Self {
        Self {
            issuer_name: text_at(document, SummaryColumn::IssuerName),
            invoice_number: text_at(document, SummaryColumn::InvoiceNumber),
            issue_date: text_at(document, SummaryColumn::IssueDate),
            due_date: text_at(document, SummaryColumn::DueDate),
            currency: text_at(document, SummaryColumn::Currency),
            net_total: number_at(document, SummaryColumn::NetTotal),
            vat_total: number_at(document, SummaryColumn::VatTotal),
            gross_total: number_at(document, SummaryColumn::GrossTotal),
        }
    }

    /// Value of a column as JSON, text or number per `SummaryColumn::is_numeric`
    pub fn value_of(&self, column: SummaryColumn) -> Value {
        match column {
            SummaryColumn::IssuerName => Value::from(self.issuer_name.as_str()),
            SummaryColumn::InvoiceNumber => Value::from(self.invoice_number.as_str()),
            SummaryColumn::IssueDate => Value::from(self.issue_date.as_str()),
            SummaryColumn::DueDate => Value::from(self.due_date.as_str()),
            SummaryColumn::Currency => Value::from(self.currency.as_str()),
            SummaryColumn::NetTotal => Value::from(self.net_total),
            SummaryColumn::VatTotal => Value::from(self.vat_total),
            SummaryColumn::GrossTotal => Value::from(self.gross_total),
        }
    }
}

fn lookup<'a>(document: &'a Document, segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    rest.iter()
        .try_fold(document.get(*first)?, |value, key| value.as_object()?.get(*key))
}

fn text_at(document: &Document, column: SummaryColumn) -> String {
    match lookup(document, column.source_path()) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Numeric column value; non-finite results (`"NaN"`, `"inf"`, `"1e999"`)
/// count as unusable and project to 0
fn number_at(document: &Document, column: SummaryColumn) -> f64 {
    let number = match lookup(document, column.source_path()) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or(0.0)
}
