use crate::models::{AccountDto, AccountRow, CustomerDto, CustomerRow};
use mapper::{MapError, Profile, Registry};

/// Customers never expose their credentials, names are joined.
pub struct CustomerProfile;

impl Profile for CustomerProfile {
    fn configure(&self, registry: &Registry) {
        registry.register(|row: &CustomerRow| CustomerDto {
            id: row.id,
            full_name: format!("{} {}", row.first_name, row.last_name),
            email: row.email.clone(),
        });
    }
}

pub struct AccountProfile;

impl Profile for AccountProfile {
    fn configure(&self, registry: &Registry) {
        registry.register_fallible(|row: &AccountRow| {
            if row.owner.is_empty() {
                return Err(MapError::from(format!("account {} has no owner", row.id)));
            }
            Ok(AccountDto {
                id: row.id,
                owner: row.owner.clone(),
                balance: format_cents(row.balance_cents),
                status: if row.frozen { "frozen" } else { "active" }.to_string(),
            })
        });
    }
}

fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}
