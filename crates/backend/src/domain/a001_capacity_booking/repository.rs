use chrono::Utc;
use contracts::domain::a001_capacity_booking::aggregate::{
    BookingId, BookingRecord, BookingStatus, TrailerSlot,
};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_capacity_booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub status: Option<String>,
    pub ship_from: String,
    pub unload_point: String,
    pub last_consignee: String,
    pub service_provider: String,
    pub pickup_reference: String,
    pub message_to_carrier: String,
    pub template_name: String,
    pub transmission_number: Option<String>,
    pub trailer_slots_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BookingRecord {
    fn from(m: Model) -> Self {
        let trailer_slots: Vec<TrailerSlot> = match serde_json::from_str(&m.trailer_slots_json) {
            Ok(slots) => slots,
            Err(e) => {
                tracing::warn!("Booking {}: unreadable trailer_slots_json: {}", m.id, e);
                Vec::new()
            }
        };

        BookingRecord {
            id: Some(BookingId::new(m.id)),
            status: m.status.as_deref().map(BookingStatus::from_code),
            ship_from: m.ship_from,
            unload_point: m.unload_point,
            last_consignee: m.last_consignee,
            service_provider: m.service_provider,
            pickup_reference: m.pickup_reference,
            message_to_carrier: m.message_to_carrier,
            template_name: m.template_name,
            transmission_number: m.transmission_number,
            trailer_slots,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn slots_json(record: &BookingRecord) -> anyhow::Result<String> {
    Ok(serde_json::to_string(&record.trailer_slots)?)
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Все неудалённые записи в порядке создания, опционально по статусу
pub async fn list_all(status: Option<&str>) -> anyhow::Result<Vec<BookingRecord>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::CreatedAt);
    if let Some(code) = status {
        query = query.filter(Column::Status.eq(code));
    }
    let items = query
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<BookingRecord>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Есть ли строка с таким id (включая удалённые)
pub async fn exists(id: &str) -> anyhow::Result<bool> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.is_some())
}

pub async fn insert(id: &str, record: &BookingRecord) -> anyhow::Result<()> {
    let now = Utc::now();
    let active = ActiveModel {
        id: Set(id.to_string()),
        status: Set(record.status.as_ref().map(|s| s.code().to_string())),
        ship_from: Set(record.ship_from.clone()),
        unload_point: Set(record.unload_point.clone()),
        last_consignee: Set(record.last_consignee.clone()),
        service_provider: Set(record.service_provider.clone()),
        pickup_reference: Set(record.pickup_reference.clone()),
        message_to_carrier: Set(record.message_to_carrier.clone()),
        template_name: Set(record.template_name.clone()),
        transmission_number: Set(record.transmission_number.clone()),
        trailer_slots_json: Set(slots_json(record)?),
        is_deleted: Set(false),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        version: Set(0),
    };
    active.insert(conn()).await?;
    Ok(())
}

/// Обновление с инкрементом версии; `false`, если строки нет
pub async fn update(id: &str, record: &BookingRecord) -> anyhow::Result<bool> {
    let Some(existing) = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?
    else {
        return Ok(false);
    };

    let active = ActiveModel {
        id: Set(id.to_string()),
        status: Set(record.status.as_ref().map(|s| s.code().to_string())),
        ship_from: Set(record.ship_from.clone()),
        unload_point: Set(record.unload_point.clone()),
        last_consignee: Set(record.last_consignee.clone()),
        service_provider: Set(record.service_provider.clone()),
        pickup_reference: Set(record.pickup_reference.clone()),
        message_to_carrier: Set(record.message_to_carrier.clone()),
        template_name: Set(record.template_name.clone()),
        transmission_number: Set(record.transmission_number.clone()),
        trailer_slots_json: Set(slots_json(record)?),
        is_deleted: Set(false),
        updated_at: Set(Some(Utc::now())),
        version: Set(existing.version + 1),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(true)
}

pub async fn soft_delete(id: &str) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
