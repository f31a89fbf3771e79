use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор бронирования мощности (непрозрачная строка)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub String);

impl BookingId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Новый идентификатор (UUID v4)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AggregateId for BookingId {
    fn as_string(&self) -> String {
        self.0.clone()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Booking id must not be empty".into());
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Status
// ============================================================================

/// Статус бронирования.
///
/// Неизвестные коды не ломают десериализацию: они сохраняются в `Other`
/// и не попадают ни в одну из трёх групп списка.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Draft,
    Confirmed,
    Template,
    Other(String),
}

impl BookingStatus {
    /// Код статуса на проводе и в БД
    pub fn code(&self) -> &str {
        match self {
            BookingStatus::Draft => "DRAFT",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Template => "TEMPLATE",
            BookingStatus::Other(code) => code.as_str(),
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "DRAFT" => BookingStatus::Draft,
            "CONFIRMED" => BookingStatus::Confirmed,
            "TEMPLATE" => BookingStatus::Template,
            other => BookingStatus::Other(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, BookingStatus::Other(_))
    }
}

impl From<String> for BookingStatus {
    fn from(code: String) -> Self {
        BookingStatus::from_code(&code)
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.code().to_string()
    }
}

// ============================================================================
// Table part
// ============================================================================

/// Строка табличной части «Трейлеры»: количество и временное окно
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailerSlot {
    /// Количество трейлеров (свободный текст, ожидается целое число)
    #[serde(default)]
    pub trailer_count: String,
    #[serde(default)]
    pub slot_start_time: String,
    #[serde(default)]
    pub slot_end_time: String,
}

impl TrailerSlot {
    pub fn empty() -> Self {
        Self::default()
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Бронирование мощности трейлеров (агрегат a001)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Отсутствует до первого успешного сохранения
    #[serde(default)]
    pub id: Option<BookingId>,

    /// `None`: статус ещё не определён (новая запись)
    #[serde(default)]
    pub status: Option<BookingStatus>,

    #[serde(default)]
    pub ship_from: String,
    #[serde(default)]
    pub unload_point: String,
    #[serde(default)]
    pub last_consignee: String,
    #[serde(default)]
    pub service_provider: String,
    #[serde(default)]
    pub pickup_reference: String,
    #[serde(default)]
    pub message_to_carrier: String,

    /// Обязательно только для шаблонов
    #[serde(default)]
    pub template_name: String,

    /// Генерируется заново при каждом сохранении
    #[serde(default)]
    pub transmission_number: Option<String>,

    /// Порядок строк значим: это порядок отображения и отправки
    #[serde(default)]
    pub trailer_slots: Vec<TrailerSlot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for BookingRecord {
    fn default() -> Self {
        Self::empty()
    }
}

impl BookingRecord {
    /// Пустая запись с одной пустой строкой трейлеров
    pub fn empty() -> Self {
        Self {
            id: None,
            status: None,
            ship_from: String::new(),
            unload_point: String::new(),
            last_consignee: String::new(),
            service_provider: String::new(),
            pickup_reference: String::new(),
            message_to_carrier: String::new(),
            template_name: String::new(),
            transmission_number: None,
            trailer_slots: vec![TrailerSlot::empty()],
            created_at: None,
            updated_at: None,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.as_string())
    }

    pub fn is_template(&self) -> bool {
        self.status == Some(BookingStatus::Template)
    }

    /// Заголовок карточки в списке
    pub fn display_title(&self) -> String {
        if self.is_template() && !self.template_name.trim().is_empty() {
            return format!("#{}", self.template_name);
        }
        format!("{} → {}", self.ship_from, self.unload_point)
    }

    /// Валидация данных перед записью в хранилище
    pub fn validate(&self) -> Result<(), String> {
        if self.ship_from.trim().is_empty() {
            return Err("shipFrom must not be empty".into());
        }
        if self.unload_point.trim().is_empty() {
            return Err("unloadPoint must not be empty".into());
        }
        if self.last_consignee.trim().is_empty() {
            return Err("lastConsignee must not be empty".into());
        }
        if self.is_template() && self.template_name.trim().is_empty() {
            return Err("templateName is required for templates".into());
        }
        if self.trailer_slots.is_empty() {
            return Err("at least one trailer slot is required".into());
        }
        Ok(())
    }
}

/// Номер передачи: 9 десятичных цифр
pub fn generate_transmission_number() -> String {
    let n = Uuid::new_v4().as_u128() % 1_000_000_000;
    format!("{:09}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_has_one_slot() {
        let record = BookingRecord::empty();
        assert!(record.id.is_none());
        assert!(record.status.is_none());
        assert_eq!(record.trailer_slots, vec![TrailerSlot::empty()]);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(BookingStatus::from_code("DRAFT"), BookingStatus::Draft);
        assert_eq!(BookingStatus::from_code("TEMPLATE").code(), "TEMPLATE");
        let other = BookingStatus::from_code("ARCHIVED");
        assert!(!other.is_known());
        assert_eq!(other.code(), "ARCHIVED");
    }

    #[test]
    fn test_deserialize_wire_record() {
        let json = r#"{
            "id": "123456789",
            "status": "CONFIRMED",
            "shipFrom": "Gothenburg",
            "unloadPoint": "Malmö",
            "lastConsignee": "ACME",
            "trailerSlots": [
                {"trailerCount": "3", "slotStartTime": "2024-01-10 09:00", "slotEndTime": "2024-01-10 10:00"}
            ]
        }"#;
        let record: BookingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(BookingId::new("123456789")));
        assert_eq!(record.status, Some(BookingStatus::Confirmed));
        assert_eq!(record.trailer_slots[0].trailer_count, "3");
        assert_eq!(record.service_provider, "");
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let json = r#"{"id": "1", "status": "ARCHIVED"}"#;
        let record: BookingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, Some(BookingStatus::Other("ARCHIVED".into())));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["status"], "ARCHIVED");
    }

    #[test]
    fn test_serialize_uses_camel_case_and_null_id() {
        let value = serde_json::to_value(BookingRecord::empty()).unwrap();
        assert!(value["id"].is_null());
        assert!(value.get("shipFrom").is_some());
        assert!(value.get("trailerSlots").is_some());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_validate() {
        let mut record = BookingRecord::empty();
        assert!(record.validate().is_err());

        record.ship_from = "Gothenburg".into();
        record.unload_point = "Malmö".into();
        record.last_consignee = "ACME".into();
        assert!(record.validate().is_ok());

        record.status = Some(BookingStatus::Template);
        assert!(record.validate().is_err());
        record.template_name = "Weekly".into();
        assert!(record.validate().is_ok());

        record.trailer_slots.clear();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_transmission_number_format() {
        let n = generate_transmission_number();
        assert_eq!(n.len(), 9);
        assert!(n.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_booking_id_from_string() {
        assert!(BookingId::from_string("  ").is_err());
        assert_eq!(BookingId::from_string(" abc ").unwrap(), BookingId::new("abc"));
    }
}
