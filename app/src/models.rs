//! Persistence rows and the API models they are exposed as.

use mapper::Record;
use serde::Serialize;

#[derive(Clone, Debug, Default, Record)]
pub struct CustomerRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl CustomerRow {
    pub fn sample() -> Self {
        CustomerRow {
            id: 17,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            password_hash: "$argon2id$v=19$...".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Record)]
pub struct CustomerDto {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}

#[derive(Clone, Debug, Default, Record)]
pub struct OrderRow {
    pub id: i64,
    pub customer_id: i64,
    pub sku: String,
    pub quantity: u32,
    pub price_cents: u64,
    pub internal_note: String,
}

impl OrderRow {
    pub fn sample() -> Self {
        OrderRow {
            id: 4711,
            customer_id: 17,
            sku: "ENG-001".to_string(),
            quantity: 2,
            price_cents: 129_900,
            internal_note: "priority shipping".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Record)]
pub struct OrderDto {
    pub id: i64,
    pub customer_id: i64,
    pub sku: String,
    pub quantity: u32,
    pub price_cents: u64,
}

#[derive(Clone, Debug, Default, Record)]
pub struct AccountRow {
    pub id: i64,
    pub owner: String,
    pub balance_cents: i64,
    pub frozen: bool,
}

impl AccountRow {
    pub fn sample() -> Self {
        AccountRow {
            id: 3,
            owner: "Ada Lovelace".to_string(),
            balance_cents: -1250,
            frozen: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Record)]
pub struct AccountDto {
    pub id: i64,
    pub owner: String,
    pub balance: String,
    pub status: String,
}
