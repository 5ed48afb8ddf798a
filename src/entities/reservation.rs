use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(12))")]
#[serde(rename_all = "snake_case")]
pub enum DurationType {
    #[sea_orm(string_value = "day_based")]
    DayBased,
    #[sea_orm(string_value = "hourly_based")]
    HourlyBased,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[sea_orm(string_value = "bus")]
    Bus,
    #[sea_orm(string_value = "minivan")]
    Minivan,
    #[sea_orm(string_value = "car")]
    Car,
}

// TODO: load the city list from the database instead of a fixed enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(100))")]
#[serde(rename_all = "snake_case")]
pub enum City {
    #[sea_orm(string_value = "kathmandu")]
    Kathmandu,
    #[sea_orm(string_value = "pokhara")]
    Pokhara,
    #[sea_orm(string_value = "lalitpur")]
    Lalitpur,
    #[sea_orm(string_value = "bhaktapur")]
    Bhaktapur,
    #[sea_orm(string_value = "biratnagar")]
    Biratnagar,
    #[sea_orm(string_value = "birgunj")]
    Birgunj,
    #[sea_orm(string_value = "dharan")]
    Dharan,
    #[sea_orm(string_value = "bharatpur")]
    Bharatpur,
    #[sea_orm(string_value = "butwal")]
    Butwal,
    #[sea_orm(string_value = "hetauda")]
    Hetauda,
    #[sea_orm(string_value = "janakpur")]
    Janakpur,
    #[sea_orm(string_value = "dhangadhi")]
    Dhangadhi,
    #[sea_orm(string_value = "nepalgunj")]
    Nepalgunj,
    #[sea_orm(string_value = "itahari")]
    Itahari,
    #[sea_orm(string_value = "tulsipur")]
    Tulsipur,
    #[sea_orm(string_value = "siddharthanagar")]
    Siddharthanagar,
    #[sea_orm(string_value = "ghorahi")]
    Ghorahi,
    #[sea_orm(string_value = "damak")]
    Damak,
    #[sea_orm(string_value = "rajbiraj")]
    Rajbiraj,
    #[sea_orm(string_value = "lahan")]
    Lahan,
    #[sea_orm(string_value = "inaruwa")]
    Inaruwa,
    #[sea_orm(string_value = "tikapur")]
    Tikapur,
    #[sea_orm(string_value = "kirtipur")]
    Kirtipur,
    #[sea_orm(string_value = "bhadrapur")]
    Bhadrapur,
    #[sea_orm(string_value = "mechinagar")]
    Mechinagar,
}

/// A vehicle rental reservation, independent of the seat-booking flow.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub mobile_no: String,
    pub date_of_travel: Date,
    pub duration_type: DurationType,
    pub passenger_numbers: i32,
    pub journey_from: City,
    pub journey_to: City,
    pub vehicle_type: VehicleType,
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
