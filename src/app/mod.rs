pub mod resource;
pub mod use_case;

pub mod transform {
    pub mod account {
        use crate::{
            app::resource::account::{CreateAccount, UpdateAccount},
            domain::entity::Account,
        };

        impl From<CreateAccount> for Account {
            fn from(dto: CreateAccount) -> Self {
                Self::new(dto.first_name, dto.last_name)
            }
        }

        impl From<(i64, UpdateAccount)> for Account {
            fn from((id, dto): (i64, UpdateAccount)) -> Self {
                Self::with_update(id, dto.first_name, dto.last_name, dto.balance)
            }
        }
    }
}
