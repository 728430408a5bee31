//! Stub backend shared by the router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use storefront_app::ports::{
    ActivationMailer, AddressRepository, HistoryStore, PasswordHasher, SearchIndex,
    SkuRepository, TokenIssuer, UserRepository, VerificationCodeStore,
};
use storefront_app::services::address_service::{AddressService, DEFAULT_ADDRESS_LIMIT};
use storefront_app::services::catalog_service::CatalogService;
use storefront_app::services::history_service::HistoryService;
use storefront_app::services::user_service::UserService;
use storefront_domain::address::{Address, AddressDraft};
use storefront_domain::catalog::{Page, Paginated, SkuOrdering};
use storefront_domain::error::StorefrontError;
use storefront_domain::history::{BrowsingHistory, HistoryLimit};
use storefront_domain::id::{AddressId, CategoryId, SkuId, UserId};
use storefront_domain::sku::{Price, Sku};
use storefront_domain::time::now;
use storefront_domain::user::{Credentials, NewUser, User};

use crate::state::{AppState, Backend};

/// The only token [`StubTokens`] accepts; it belongs to user 1.
pub const VALID_TOKEN: &str = "valid-token";

pub struct StubBackend;

impl Backend for StubBackend {
    type History = StubHistory;
    type Skus = StubSkus;
    type Users = StubUsers;
    type Addresses = StubAddresses;
    type Codes = StubCodes;
    type Hasher = StubHasher;
    type Tokens = StubTokens;
    type Mailer = StubMailer;
}

fn alice() -> User {
    User {
        id: UserId::new(1).unwrap(),
        username: "alice01".to_string(),
        mobile: "13812345678".to_string(),
        email: None,
        email_active: false,
        default_address_id: None,
    }
}

#[derive(Default)]
pub struct StubHistory(Mutex<HashMap<UserId, BrowsingHistory>>);

impl HistoryStore for StubHistory {
    async fn record(
        &self,
        user: UserId,
        sku: SkuId,
        limit: HistoryLimit,
    ) -> Result<(), StorefrontError> {
        self.0
            .lock()
            .unwrap()
            .entry(user)
            .or_default()
            .record(sku, limit);
        Ok(())
    }

    async fn list(&self, user: UserId, _limit: HistoryLimit) -> Result<Vec<SkuId>, StorefrontError> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .get(&user)
            .map(|history| history.items().to_vec())
            .unwrap_or_default())
    }
}

/// Three launched SKUs, ids 1 to 3, all in category 1.
pub struct StubSkus;

impl StubSkus {
    fn all() -> Vec<Sku> {
        (1..=3)
            .map(|id| Sku {
                id: SkuId::new(id).unwrap(),
                category_id: CategoryId::new(1).unwrap(),
                name: format!("sku {id}"),
                caption: String::new(),
                price: Price::from_cents(100 * id),
                default_image_url: String::new(),
                comments: 0,
                sales: 0,
                is_launched: true,
                created_at: now(),
            })
            .collect()
    }

    fn paginate(skus: Vec<Sku>, page: Page) -> Paginated<Sku> {
        let count = skus.len() as u64;
        let results = skus
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap())
            .take(page.page_size() as usize)
            .collect();
        Paginated::new(page, count, results)
    }
}

impl SkuRepository for StubSkus {
    async fn get_by_id(&self, id: SkuId) -> Result<Option<Sku>, StorefrontError> {
        Ok(Self::all().into_iter().find(|sku| sku.id == id))
    }

    async fn exists(&self, id: SkuId) -> Result<bool, StorefrontError> {
        Ok(Self::all().iter().any(|sku| sku.id == id))
    }

    async fn get_many(&self, ids: &[SkuId]) -> Result<Vec<Sku>, StorefrontError> {
        Ok(Self::all()
            .into_iter()
            .filter(|sku| ids.contains(&sku.id))
            .collect())
    }

    async fn list_by_category(
        &self,
        category: CategoryId,
        _ordering: SkuOrdering,
        page: Page,
    ) -> Result<Paginated<Sku>, StorefrontError> {
        let skus = Self::all()
            .into_iter()
            .filter(|sku| sku.category_id == category)
            .collect();
        Ok(Self::paginate(skus, page))
    }
}

impl SearchIndex for StubSkus {
    async fn search(&self, text: &str, page: Page) -> Result<Paginated<Sku>, StorefrontError> {
        let skus = Self::all()
            .into_iter()
            .filter(|sku| sku.name.contains(text))
            .collect();
        Ok(Self::paginate(skus, page))
    }
}

pub struct StubUsers;

impl UserRepository for StubUsers {
    async fn count_by_username(&self, username: &str) -> Result<u64, StorefrontError> {
        Ok(u64::from(username == "alice01"))
    }
    async fn count_by_mobile(&self, mobile: &str) -> Result<u64, StorefrontError> {
        Ok(u64::from(mobile == "13812345678"))
    }
    async fn create(&self, user: NewUser) -> Result<User, StorefrontError> {
        Ok(User {
            id: UserId::new(2).unwrap(),
            username: user.username,
            mobile: user.mobile,
            ..alice()
        })
    }
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StorefrontError> {
        Ok((id.get() == 1).then(alice))
    }
    async fn find_credentials(&self, _account: &str) -> Result<Option<Credentials>, StorefrontError> {
        Ok(None)
    }
    async fn update_email(&self, _id: UserId, _email: &str) -> Result<(), StorefrontError> {
        Ok(())
    }
    async fn activate_email(&self, _id: UserId, _email: &str) -> Result<bool, StorefrontError> {
        Ok(false)
    }
    async fn set_default_address(
        &self,
        _id: UserId,
        _address: Option<AddressId>,
    ) -> Result<(), StorefrontError> {
        Ok(())
    }
}

pub struct StubAddresses;

impl AddressRepository for StubAddresses {
    async fn count_active(&self, _user: UserId) -> Result<usize, StorefrontError> {
        Ok(0)
    }
    async fn create(&self, user: UserId, draft: AddressDraft) -> Result<Address, StorefrontError> {
        Ok(Address {
            id: AddressId::new(1).unwrap(),
            user_id: user,
            title: draft.title,
            receiver: draft.receiver,
            province_id: draft.province_id,
            city_id: draft.city_id,
            district_id: draft.district_id,
            place: draft.place,
            mobile: draft.mobile,
            tel: draft.tel,
            email: draft.email,
        })
    }
    async fn list_active(&self, _user: UserId) -> Result<Vec<Address>, StorefrontError> {
        Ok(vec![])
    }
    async fn get(&self, _user: UserId, _id: AddressId) -> Result<Option<Address>, StorefrontError> {
        Ok(None)
    }
    async fn update(
        &self,
        _user: UserId,
        _id: AddressId,
        _draft: AddressDraft,
    ) -> Result<Option<Address>, StorefrontError> {
        Ok(None)
    }
    async fn soft_delete(&self, _user: UserId, _id: AddressId) -> Result<bool, StorefrontError> {
        Ok(false)
    }
    async fn update_title(
        &self,
        _user: UserId,
        _id: AddressId,
        _title: &str,
    ) -> Result<bool, StorefrontError> {
        Ok(false)
    }
}

pub struct StubCodes;

impl VerificationCodeStore for StubCodes {
    async fn sms_code(&self, _mobile: &str) -> Result<Option<String>, StorefrontError> {
        Ok(None)
    }
}

pub struct StubHasher;

impl PasswordHasher for StubHasher {
    async fn hash(&self, password: &str) -> Result<String, StorefrontError> {
        Ok(password.to_string())
    }
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, StorefrontError> {
        Ok(password == hash)
    }
}

pub struct StubTokens;

impl TokenIssuer for StubTokens {
    async fn issue_access(&self, _user: UserId) -> Result<String, StorefrontError> {
        Ok(VALID_TOKEN.to_string())
    }
    async fn verify_access(&self, token: &str) -> Result<Option<UserId>, StorefrontError> {
        Ok((token == VALID_TOKEN).then(|| UserId::new(1).unwrap()))
    }
    async fn issue_email_verification(
        &self,
        _user: UserId,
        _email: &str,
    ) -> Result<String, StorefrontError> {
        Ok("email-token".to_string())
    }
    async fn verify_email(
        &self,
        _token: &str,
    ) -> Result<Option<(UserId, String)>, StorefrontError> {
        Ok(None)
    }
}

pub struct StubMailer;

impl ActivationMailer for StubMailer {
    async fn send_activation(&self, _to: &str, _verify_url: &str) -> Result<(), StorefrontError> {
        Ok(())
    }
}

pub fn test_state() -> AppState<StubBackend> {
    AppState::new(
        HistoryService::new(StubHistory::default(), StubSkus, HistoryLimit::default()),
        CatalogService::new(StubSkus),
        UserService::new(
            StubUsers,
            StubCodes,
            StubHasher,
            StubTokens,
            StubMailer,
            "http://shop/success_verify_email.html",
        ),
        AddressService::new(StubAddresses, StubUsers, DEFAULT_ADDRESS_LIMIT),
    )
}
