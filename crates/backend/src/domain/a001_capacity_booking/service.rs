use super::repository;
use contracts::domain::a001_capacity_booking::aggregate::{
    generate_transmission_number, BookingId, BookingRecord, BookingStatus, TrailerSlot,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingServiceError {
    #[error("booking {0} not found")]
    NotFound(String),
    #[error("booking {0} already exists")]
    Conflict(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, BookingServiceError>;

/// Список бронирований, опционально по коду статуса
pub async fn list_all(status: Option<&str>) -> ServiceResult<Vec<BookingRecord>> {
    Ok(repository::list_all(status).await?)
}

pub async fn get_by_id(id: &str) -> ServiceResult<BookingRecord> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| BookingServiceError::NotFound(id.to_string()))
}

/// Создание: id назначается сервером, если клиент его не прислал
pub async fn create(record: BookingRecord) -> ServiceResult<BookingRecord> {
    record.validate().map_err(BookingServiceError::Validation)?;

    let id = match record.id.as_ref() {
        Some(id) if !id.value().trim().is_empty() => id.value().to_string(),
        _ => BookingId::generate().0,
    };
    if repository::exists(&id).await? {
        return Err(BookingServiceError::Conflict(id));
    }

    repository::insert(&id, &record).await?;
    tracing::info!(
        "Booking {} created with status {}",
        id,
        record.status.as_ref().map(|s| s.code()).unwrap_or("-")
    );
    get_by_id(&id).await
}

/// Обновление: id из пути приоритетнее id в теле
pub async fn update(id: &str, record: BookingRecord) -> ServiceResult<BookingRecord> {
    record.validate().map_err(BookingServiceError::Validation)?;

    if !repository::update(id, &record).await? {
        return Err(BookingServiceError::NotFound(id.to_string()));
    }
    tracing::info!("Booking {} updated", id);
    get_by_id(id).await
}

pub async fn delete(id: &str) -> ServiceResult<()> {
    if !repository::soft_delete(id).await? {
        return Err(BookingServiceError::NotFound(id.to_string()));
    }
    tracing::info!("Booking {} deleted", id);
    Ok(())
}

fn demo_record(
    status: BookingStatus,
    ship_from: &str,
    unload_point: &str,
    last_consignee: &str,
    template_name: &str,
    slots: &[(&str, &str, &str)],
) -> BookingRecord {
    BookingRecord {
        status: Some(status),
        ship_from: ship_from.into(),
        unload_point: unload_point.into(),
        last_consignee: last_consignee.into(),
        template_name: template_name.into(),
        transmission_number: Some(generate_transmission_number()),
        trailer_slots: slots
            .iter()
            .map(|(count, start, end)| TrailerSlot {
                trailer_count: (*count).into(),
                slot_start_time: (*start).into(),
                slot_end_time: (*end).into(),
            })
            .collect(),
        ..BookingRecord::empty()
    }
}

/// Вставка тестовых данных
pub async fn insert_test_data() -> ServiceResult<usize> {
    let data = vec![
        demo_record(
            BookingStatus::Draft,
            "Gothenburg",
            "Malmö",
            "ACME Logistics",
            "",
            &[("3", "2030-01-10 09:00", "2030-01-10 10:00")],
        ),
        demo_record(
            BookingStatus::Draft,
            "Skövde",
            "Umeå",
            "Nordic Parts",
            "",
            &[
                ("1", "2030-02-03 06:00", "2030-02-03 07:00"),
                ("2", "2030-02-03 12:00", "2030-02-03 13:30"),
            ],
        ),
        demo_record(
            BookingStatus::Confirmed,
            "Ghent",
            "Gothenburg",
            "Volvo Cars Torslanda",
            "",
            &[("5", "2030-01-15 14:00", "2030-01-15 16:00")],
        ),
        demo_record(
            BookingStatus::Template,
            "Wrocław",
            "Tuve",
            "Cab Plant",
            "Weekly Wrocław shuttle",
            &[("4", "2030-01-20 05:00", "2030-01-20 06:00")],
        ),
    ];

    let count = data.len();
    for record in data {
        create(record).await?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;

    fn valid_record() -> BookingRecord {
        BookingRecord {
            status: Some(BookingStatus::Draft),
            ship_from: "Gothenburg".into(),
            unload_point: "Malmö".into(),
            last_consignee: "ACME".into(),
            transmission_number: Some("123456789".into()),
            ..BookingRecord::empty()
        }
    }

    // Глобальное соединение одно на процесс, поэтому весь сценарий в одном тесте
    #[tokio::test]
    async fn test_booking_lifecycle_on_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let db_file = dir.path().join("booking-test.db");
        initialize_database(&db_file).await.unwrap();

        // create assigns an id when absent
        let created = create(valid_record()).await.unwrap();
        let id = created.id.clone().unwrap();
        assert!(created.created_at.is_some());
        assert_eq!(created.trailer_slots.len(), 1);

        // create keeps a client-minted id, rejects duplicates
        let mut template = valid_record();
        template.id = Some(BookingId::new("tpl-1"));
        template.status = Some(BookingStatus::Template);
        template.template_name = "Weekly".into();
        let created_template = create(template.clone()).await.unwrap();
        assert_eq!(created_template.id, Some(BookingId::new("tpl-1")));
        assert!(matches!(
            create(template).await,
            Err(BookingServiceError::Conflict(_))
        ));

        // validation failure
        let mut invalid = valid_record();
        invalid.ship_from.clear();
        assert!(matches!(
            create(invalid).await,
            Err(BookingServiceError::Validation(_))
        ));

        // update
        let mut changed = created.clone();
        changed.status = Some(BookingStatus::Confirmed);
        changed.pickup_reference = "PU-1".into();
        let updated = update(id.value(), changed).await.unwrap();
        assert_eq!(updated.status, Some(BookingStatus::Confirmed));
        assert_eq!(updated.pickup_reference, "PU-1");
        assert!(matches!(
            update("missing", valid_record()).await,
            Err(BookingServiceError::NotFound(_))
        ));

        // path id wins over body id
        let mut foreign = updated.clone();
        foreign.id = Some(BookingId::new("other"));
        foreign.ship_from = "Halmstad".into();
        let renamed = update(id.value(), foreign).await.unwrap();
        assert_eq!(renamed.id, Some(id.clone()));
        assert_eq!(renamed.ship_from, "Halmstad");
        assert!(matches!(
            get_by_id("other").await,
            Err(BookingServiceError::NotFound(_))
        ));

        // list with and without status filter
        assert_eq!(list_all(None).await.unwrap().len(), 2);
        let templates = list_all(Some("TEMPLATE")).await.unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].template_name, "Weekly");

        // delete
        delete(id.value()).await.unwrap();
        assert!(matches!(
            get_by_id(id.value()).await,
            Err(BookingServiceError::NotFound(_))
        ));
        assert!(matches!(
            delete(id.value()).await,
            Err(BookingServiceError::NotFound(_))
        ));
        assert_eq!(list_all(None).await.unwrap().len(), 1);

        // demo data
        assert_eq!(insert_test_data().await.unwrap(), 4);
        assert_eq!(list_all(Some("DRAFT")).await.unwrap().len(), 2);
    }
}
