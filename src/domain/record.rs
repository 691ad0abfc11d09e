//! Record types
//!
//! [`RawRecord`] keeps the upstream JSON object as-is; [`FlatRecord`] is the
//! fixed-column shape written to the spreadsheet.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field carrying the source label added by batch queries
pub const SOURCE_FIELD: &str = "_source";
/// Field carrying the source type added by batch queries
pub const SOURCE_TYPE_FIELD: &str = "_sourceType";

/// A notification as returned by the API
///
/// The upstream schema is not fixed, so fields are looked up by name and
/// missing or unexpected values are tolerated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a record from a JSON value, returning `None` for non-objects
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Identifier used for deduplication
    ///
    /// Strings and non-zero numbers are accepted. Missing, null, blank, boolean
    /// and zero ids yield `None`.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns a scalar field rendered as text
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Returns the raw JSON value of a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Tags the record with the identity that produced it
    pub fn with_source(mut self, label: &str, source_type: &str) -> Self {
        self.0
            .insert(SOURCE_FIELD.to_string(), Value::String(label.to_string()));
        self.0.insert(
            SOURCE_TYPE_FIELD.to_string(),
            Value::String(source_type.to_string()),
        );
        self
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Spreadsheet columns in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    AvailabilityDate,
    Court,
    CommunicationType,
    IssuingBody,
    Text,
    ProcessNumber,
    Link,
    DocumentType,
    Class,
    CommunicationNumber,
    Status,
    DeliveryChannel,
    Recipients,
    Attorneys,
    Source,
}

impl Column {
    pub const ALL: [Column; 16] = [
        Column::Id,
        Column::AvailabilityDate,
        Column::Court,
        Column::CommunicationType,
        Column::IssuingBody,
        Column::Text,
        Column::ProcessNumber,
        Column::Link,
        Column::DocumentType,
        Column::Class,
        Column::CommunicationNumber,
        Column::Status,
        Column::DeliveryChannel,
        Column::Recipients,
        Column::Attorneys,
        Column::Source,
    ];

    /// Header shown in the first row
    pub fn header(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::AvailabilityDate => "Data Disponibilização",
            Column::Court => "Tribunal",
            Column::CommunicationType => "Tipo Comunicação",
            Column::IssuingBody => "Órgão",
            Column::Text => "Texto",
            Column::ProcessNumber => "Número Processo",
            Column::Link => "Link",
            Column::DocumentType => "Tipo Documento",
            Column::Class => "Classe",
            Column::CommunicationNumber => "Número Comunicação",
            Column::Status => "Status",
            Column::DeliveryChannel => "Meio",
            Column::Recipients => "Destinatários",
            Column::Attorneys => "Advogados",
            Column::Source => "Fonte da Consulta",
        }
    }

    /// Column width in characters
    pub fn width(self) -> f64 {
        match self {
            Column::Id => 15.0,
            Column::AvailabilityDate => 18.0,
            Column::Court => 12.0,
            Column::CommunicationType => 18.0,
            Column::IssuingBody => 25.0,
            Column::Text => 50.0,
            Column::ProcessNumber => 25.0,
            Column::Link => 30.0,
            Column::DocumentType => 18.0,
            Column::Class => 20.0,
            Column::CommunicationNumber => 20.0,
            Column::Status => 12.0,
            Column::DeliveryChannel => 15.0,
            Column::Recipients => 30.0,
            Column::Attorneys => 30.0,
            Column::Source => 20.0,
        }
    }
}

/// A notification projected onto the spreadsheet columns
///
/// Every field is a string; missing upstream values are empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlatRecord {
    pub id: String,
    pub availability_date: String,
    pub court: String,
    pub communication_type: String,
    pub issuing_body: String,
    pub text: String,
    pub process_number: String,
    pub link: String,
    pub document_type: String,
    pub class: String,
    pub communication_number: String,
    pub status: String,
    pub delivery_channel: String,
    pub recipients: String,
    pub attorneys: String,
    pub source: String,
}

impl FlatRecord {
    /// Value of the given column
    pub fn value(&self, column: Column) -> &str {
        match column {
            Column::Id => &self.id,
            Column::AvailabilityDate => &self.availability_date,
            Column::Court => &self.court,
            Column::CommunicationType => &self.communication_type,
            Column::IssuingBody => &self.issuing_body,
            Column::Text => &self.text,
            Column::ProcessNumber => &self.process_number,
            Column::Link => &self.link,
            Column::DocumentType => &self.document_type,
            Column::Class => &self.class,
            Column::CommunicationNumber => &self.communication_number,
            Column::Status => &self.status,
            Column::DeliveryChannel => &self.delivery_channel,
            Column::Recipients => &self.recipients,
            Column::Attorneys => &self.attorneys,
            Column::Source => &self.source,
        }
    }
}
