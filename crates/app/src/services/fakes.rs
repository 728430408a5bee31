//! In-memory port implementations shared by the service tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use storefront_domain::address::{Address, AddressDraft};
use storefront_domain::catalog::{Page, Paginated, SkuOrdering, SkuSortKey};
use storefront_domain::error::{StorefrontError, ValidationError};
use storefront_domain::history::{BrowsingHistory, HistoryLimit};
use storefront_domain::homepage::{Category, Channel, Content, Homepage};
use storefront_domain::id::{AddressId, CategoryId, SkuId, UserId};
use storefront_domain::sku::{Price, Sku};
use storefront_domain::time::now;
use storefront_domain::user::{Credentials, NewUser, User};

use crate::ports::{
    ActivationMailer, AddressRepository, HistoryStore, HomepageSource, PagePublisher,
    PasswordHasher, SearchIndex, SkuRepository, TokenIssuer, UserRepository,
    VerificationCodeStore,
};

fn next_id(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

pub fn sku(id: i64, category: i64) -> Sku {
    Sku {
        id: SkuId::new(id).unwrap(),
        category_id: CategoryId::new(category).unwrap(),
        name: format!("sku {id}"),
        caption: format!("caption {id}"),
        price: Price::from_cents(id * 100),
        default_image_url: format!("http://img/{id}.jpg"),
        comments: id,
        sales: 100 - id,
        is_launched: true,
        created_at: now() + chrono::Duration::seconds(id),
    }
}

/// History store whose `record` is atomic because it runs under one lock.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    lists: Mutex<HashMap<UserId, BrowsingHistory>>,
    fail_next: AtomicBool,
}

impl InMemoryHistoryStore {
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl HistoryStore for InMemoryHistoryStore {
    async fn record(
        &self,
        user: UserId,
        sku: SkuId,
        limit: HistoryLimit,
    ) -> Result<(), StorefrontError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StorefrontError::store(std::io::Error::other(
                "connection reset",
            )));
        }
        let mut lists = self.lists.lock().unwrap();
        lists.entry(user).or_default().record(sku, limit);
        Ok(())
    }

    async fn list(&self, user: UserId, limit: HistoryLimit) -> Result<Vec<SkuId>, StorefrontError> {
        let lists = self.lists.lock().unwrap();
        Ok(lists
            .get(&user)
            .map(|history| history.items().iter().take(limit.get()).copied().collect())
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct InMemorySkuRepo {
    skus: Mutex<BTreeMap<SkuId, Sku>>,
}

impl InMemorySkuRepo {
    pub fn with(skus: impl IntoIterator<Item = Sku>) -> Self {
        Self {
            skus: Mutex::new(skus.into_iter().map(|s| (s.id, s)).collect()),
        }
    }

    pub fn remove(&self, id: SkuId) {
        self.skus.lock().unwrap().remove(&id);
    }

    fn paginate(mut found: Vec<Sku>, page: Page) -> Paginated<Sku> {
        let count = found.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap();
        let results = if offset >= found.len() {
            Vec::new()
        } else {
            found
                .drain(offset..)
                .take(page.page_size() as usize)
                .collect()
        };
        Paginated::new(page, count, results)
    }
}

impl SkuRepository for InMemorySkuRepo {
    async fn get_by_id(&self, id: SkuId) -> Result<Option<Sku>, StorefrontError> {
        Ok(self.skus.lock().unwrap().get(&id).cloned())
    }

    async fn exists(&self, id: SkuId) -> Result<bool, StorefrontError> {
        Ok(self.skus.lock().unwrap().contains_key(&id))
    }

    async fn get_many(&self, ids: &[SkuId]) -> Result<Vec<Sku>, StorefrontError> {
        let skus = self.skus.lock().unwrap();
        Ok(ids.iter().filter_map(|id| skus.get(id).cloned()).collect())
    }

    async fn list_by_category(
        &self,
        category: CategoryId,
        ordering: SkuOrdering,
        page: Page,
    ) -> Result<Paginated<Sku>, StorefrontError> {
        let mut found: Vec<Sku> = self
            .skus
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.category_id == category && s.is_launched)
            .cloned()
            .collect();
        match ordering.key {
            SkuSortKey::CreateTime => found.sort_by_key(|s| s.created_at),
            SkuSortKey::Price => found.sort_by_key(|s| s.price),
            SkuSortKey::Sales => found.sort_by_key(|s| s.sales),
        }
        if ordering.descending {
            found.reverse();
        }
        Ok(Self::paginate(found, page))
    }
}

impl SearchIndex for InMemorySkuRepo {
    async fn search(&self, text: &str, page: Page) -> Result<Paginated<Sku>, StorefrontError> {
        let found: Vec<Sku> = self
            .skus
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.is_launched && (s.name.contains(text) || s.caption.contains(text)))
            .cloned()
            .collect();
        Ok(Self::paginate(found, page))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<Vec<Credentials>>,
    next: AtomicI64,
}

impl UserRepository for InMemoryUserRepo {
    async fn count_by_username(&self, username: &str) -> Result<u64, StorefrontError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|c| c.user.username == username).count() as u64)
    }

    async fn count_by_mobile(&self, mobile: &str) -> Result<u64, StorefrontError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().filter(|c| c.user.mobile == mobile).count() as u64)
    }

    async fn create(&self, user: NewUser) -> Result<User, StorefrontError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|c| c.user.username == user.username) {
            return Err(ValidationError::UsernameTaken(user.username).into());
        }
        let created = User {
            id: UserId::new(next_id(&self.next)).unwrap(),
            username: user.username,
            mobile: user.mobile,
            email: None,
            email_active: false,
            default_address_id: None,
        };
        users.push(Credentials {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, StorefrontError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|c| c.user.id == id).map(|c| c.user.clone()))
    }

    async fn find_credentials(&self, account: &str) -> Result<Option<Credentials>, StorefrontError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|c| c.user.username == account || c.user.mobile == account)
            .cloned())
    }

    async fn update_email(&self, id: UserId, email: &str) -> Result<(), StorefrontError> {
        let mut users = self.users.lock().unwrap();
        if let Some(c) = users.iter_mut().find(|c| c.user.id == id) {
            c.user.email = Some(email.to_owned());
            c.user.email_active = false;
        }
        Ok(())
    }

    async fn activate_email(&self, id: UserId, email: &str) -> Result<bool, StorefrontError> {
        let mut users = self.users.lock().unwrap();
        match users
            .iter_mut()
            .find(|c| c.user.id == id && c.user.email.as_deref() == Some(email))
        {
            Some(c) => {
                c.user.email_active = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_default_address(
        &self,
        id: UserId,
        address: Option<AddressId>,
    ) -> Result<(), StorefrontError> {
        let mut users = self.users.lock().unwrap();
        if let Some(c) = users.iter_mut().find(|c| c.user.id == id) {
            c.user.default_address_id = address;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCodes {
    codes: Mutex<HashMap<String, String>>,
}

impl InMemoryCodes {
    pub fn put(&self, mobile: &str, code: &str) {
        self.codes
            .lock()
            .unwrap()
            .insert(mobile.to_owned(), code.to_owned());
    }
}

impl VerificationCodeStore for InMemoryCodes {
    async fn sms_code(&self, mobile: &str) -> Result<Option<String>, StorefrontError> {
        Ok(self.codes.lock().unwrap().get(mobile).cloned())
    }
}

/// Reversible "hash" that keeps tests fast.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, StorefrontError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, StorefrontError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

#[derive(Default)]
pub struct InMemoryTokens {
    access: Mutex<HashMap<String, UserId>>,
    email: Mutex<HashMap<String, (UserId, String)>>,
    next: AtomicI64,
}

impl TokenIssuer for InMemoryTokens {
    async fn issue_access(&self, user: UserId) -> Result<String, StorefrontError> {
        let token = format!("access-{}", next_id(&self.next));
        self.access.lock().unwrap().insert(token.clone(), user);
        Ok(token)
    }

    async fn verify_access(&self, token: &str) -> Result<Option<UserId>, StorefrontError> {
        Ok(self.access.lock().unwrap().get(token).copied())
    }

    async fn issue_email_verification(
        &self,
        user: UserId,
        email: &str,
    ) -> Result<String, StorefrontError> {
        let token = format!("email-{}", next_id(&self.next));
        self.email
            .lock()
            .unwrap()
            .insert(token.clone(), (user, email.to_owned()));
        Ok(token)
    }

    async fn verify_email(&self, token: &str) -> Result<Option<(UserId, String)>, StorefrontError> {
        Ok(self.email.lock().unwrap().get(token).cloned())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl ActivationMailer for RecordingMailer {
    async fn send_activation(&self, to: &str, verify_url: &str) -> Result<(), StorefrontError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), verify_url.to_owned()));
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAddressRepo {
    rows: Mutex<Vec<(Address, bool)>>,
    next: AtomicI64,
}

fn materialize(id: AddressId, user: UserId, draft: AddressDraft) -> Address {
    Address {
        id,
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
    }
}

impl AddressRepository for InMemoryAddressRepo {
    async fn count_active(&self, user: UserId) -> Result<usize, StorefrontError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|(a, deleted)| a.user_id == user && !deleted)
            .count())
    }

    async fn create(&self, user: UserId, draft: AddressDraft) -> Result<Address, StorefrontError> {
        let address = materialize(AddressId::new(next_id(&self.next)).unwrap(), user, draft);
        self.rows.lock().unwrap().push((address.clone(), false));
        Ok(address)
    }

    async fn list_active(&self, user: UserId) -> Result<Vec<Address>, StorefrontError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|(a, deleted)| a.user_id == user && !deleted)
            .map(|(a, _)| a.clone())
            .collect())
    }

    async fn get(&self, user: UserId, id: AddressId) -> Result<Option<Address>, StorefrontError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|(a, deleted)| a.id == id && a.user_id == user && !deleted)
            .map(|(a, _)| a.clone()))
    }

    async fn update(
        &self,
        user: UserId,
        id: AddressId,
        draft: AddressDraft,
    ) -> Result<Option<Address>, StorefrontError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|(a, deleted)| a.id == id && a.user_id == user && !deleted)
            .map(|(a, _)| {
                *a = materialize(id, user, draft);
                a.clone()
            }))
    }

    async fn soft_delete(&self, user: UserId, id: AddressId) -> Result<bool, StorefrontError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|(a, deleted)| a.id == id && a.user_id == user && !deleted)
        {
            Some((_, deleted)) => {
                *deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_title(
        &self,
        user: UserId,
        id: AddressId,
        title: &str,
    ) -> Result<bool, StorefrontError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|(a, deleted)| a.id == id && a.user_id == user && !deleted)
        {
            Some((a, _)) => {
                title.clone_into(&mut a.title);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct StaticHomepageSource {
    pub channels: Vec<Channel>,
    pub categories: Vec<Category>,
    pub contents: Vec<Content>,
}

impl HomepageSource for StaticHomepageSource {
    async fn channels(&self) -> Result<Vec<Channel>, StorefrontError> {
        Ok(self.channels.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>, StorefrontError> {
        Ok(self.categories.clone())
    }

    async fn contents(&self) -> Result<Vec<Content>, StorefrontError> {
        Ok(self.contents.clone())
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<Homepage>>,
}

impl PagePublisher for RecordingPublisher {
    async fn publish(&self, homepage: &Homepage) -> Result<(), StorefrontError> {
        self.published.lock().unwrap().push(homepage.clone());
        Ok(())
    }
}
