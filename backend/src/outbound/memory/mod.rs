//! In-process store implementing every driven port.
//!
//! Used when no database is configured and by the HTTP integration tests. It
//! enforces the same constraints as the PostgreSQL schema: unique emails and
//! titles, one phone per user, and owner references that must resolve.
//! Deleting a user removes its phone and detaches its posts. Every write checks
//! its constraints before touching the tables, so a rejected write leaves no
//! partial records behind.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    PhoneRepository, PhoneRepositoryError, PostRepository, PostRepositoryError, RecordLookup,
    RecordLookupError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    LookupValue, NewPost, NewUser, Phone, PhoneId, PhoneWithOwner, Post, PostChanges, PostId,
    PostWithOwner, RecordColumn, User, UserChanges, UserId, UserWithPhone,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    phones: BTreeMap<i64, Phone>,
    posts: BTreeMap<i64, Post>,
    last_user_id: i64,
    last_phone_id: i64,
    last_post_id: i64,
}

impl Tables {
    fn phone_of(&self, user_id: UserId) -> Option<&Phone> {
        self.phones.values().find(|phone| phone.user_id == user_id)
    }

    fn user_with_phone(&self, user: &User) -> UserWithPhone {
        UserWithPhone {
            user: user.clone(),
            phone: self.phone_of(user.id).cloned(),
        }
    }

    fn post_with_owner(&self, post: &Post) -> PostWithOwner {
        PostWithOwner {
            post: post.clone(),
            owner_name: post
                .user_id
                .and_then(|owner| self.users.get(&owner.get()))
                .map(|owner| owner.name.clone()),
        }
    }

    fn email_taken(&self, email: &str, ignore: Option<i64>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id.get()) != ignore)
    }

    fn title_taken(&self, title: &str, ignore: Option<i64>) -> bool {
        self.posts
            .values()
            .any(|post| post.title == title && Some(post.id.get()) != ignore)
    }

    fn upsert_phone(&mut self, user_id: UserId, number: &str) {
        let now = Utc::now();
        if let Some(phone) = self
            .phones
            .values_mut()
            .find(|phone| phone.user_id == user_id)
        {
            phone.number = number.to_owned();
            phone.updated_at = now;
            return;
        }
        self.last_phone_id += 1;
        let id = self.last_phone_id;
        self.phones.insert(
            id,
            Phone {
                id: PhoneId::new(id),
                number: number.to_owned(),
                user_id,
                created_at: now,
                updated_at: now,
            },
        );
    }
}

/// Shared in-memory tables. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, &'static str> {
        self.tables.lock().map_err(|_| POISONED)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<UserWithPhone>, UserRepositoryError> {
        let tables = self.tables().map_err(UserRepositoryError::query)?;
        Ok(tables
            .users
            .values()
            .map(|user| tables.user_with_phone(user))
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserWithPhone>, UserRepositoryError> {
        let tables = self.tables().map_err(UserRepositoryError::query)?;
        Ok(tables
            .users
            .get(&id.get())
            .map(|user| tables.user_with_phone(user)))
    }

    async fn create(&self, user: &NewUser) -> Result<UserWithPhone, UserRepositoryError> {
        let mut tables = self.tables().map_err(UserRepositoryError::query)?;
        if tables.email_taken(&user.email, None) {
            return Err(UserRepositoryError::conflict("email"));
        }

        let now = Utc::now();
        tables.last_user_id += 1;
        let id = UserId::new(tables.last_user_id);
        let stored = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(id.get(), stored.clone());
        if let Some(number) = &user.number {
            tables.upsert_phone(id, number);
        }

        Ok(tables.user_with_phone(&stored))
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<UserWithPhone>, UserRepositoryError> {
        let mut tables = self.tables().map_err(UserRepositoryError::query)?;
        if !tables.users.contains_key(&id.get()) {
            return Ok(None);
        }
        if changes
            .email
            .as_deref()
            .is_some_and(|email| tables.email_taken(email, Some(id.get())))
        {
            return Err(UserRepositoryError::conflict("email"));
        }

        if let Some(number) = &changes.number {
            tables.upsert_phone(id, number);
        }
        let Some(user) = tables.users.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            user.name.clone_from(name);
        }
        if let Some(email) = &changes.email {
            user.email.clone_from(email);
        }
        if let Some(password) = &changes.password {
            user.password = password.clone();
        }
        user.updated_at = Utc::now();
        let updated = user.clone();

        Ok(Some(tables.user_with_phone(&updated)))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        let mut tables = self.tables().map_err(UserRepositoryError::query)?;
        if tables.users.remove(&id.get()).is_none() {
            return Ok(false);
        }
        tables.phones.retain(|_, phone| phone.user_id != id);
        for post in tables.posts.values_mut() {
            if post.user_id == Some(id) {
                post.user_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<PostWithOwner>, PostRepositoryError> {
        let tables = self.tables().map_err(PostRepositoryError::query)?;
        Ok(tables
            .posts
            .values()
            .map(|post| tables.post_with_owner(post))
            .collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<PostWithOwner>, PostRepositoryError> {
        let tables = self.tables().map_err(PostRepositoryError::query)?;
        Ok(tables
            .posts
            .get(&id.get())
            .map(|post| tables.post_with_owner(post)))
    }

    async fn create(&self, post: &NewPost) -> Result<PostWithOwner, PostRepositoryError> {
        let mut tables = self.tables().map_err(PostRepositoryError::query)?;
        if tables.title_taken(&post.title, None) {
            return Err(PostRepositoryError::conflict("title"));
        }
        if post
            .user_id
            .is_some_and(|owner| !tables.users.contains_key(&owner.get()))
        {
            return Err(PostRepositoryError::conflict("user_id"));
        }

        let now = Utc::now();
        tables.last_post_id += 1;
        let id = PostId::new(tables.last_post_id);
        let stored = Post {
            id,
            title: post.title.clone(),
            description: post.description.clone(),
            user_id: post.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.posts.insert(id.get(), stored.clone());

        Ok(tables.post_with_owner(&stored))
    }

    async fn update(
        &self,
        id: PostId,
        changes: &PostChanges,
    ) -> Result<Option<PostWithOwner>, PostRepositoryError> {
        let mut tables = self.tables().map_err(PostRepositoryError::query)?;
        if !tables.posts.contains_key(&id.get()) {
            return Ok(None);
        }
        if changes
            .title
            .as_deref()
            .is_some_and(|title| tables.title_taken(title, Some(id.get())))
        {
            return Err(PostRepositoryError::conflict("title"));
        }
        if changes
            .user_id
            .is_some_and(|owner| !tables.users.contains_key(&owner.get()))
        {
            return Err(PostRepositoryError::conflict("user_id"));
        }

        let Some(post) = tables.posts.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            post.title.clone_from(title);
        }
        if let Some(description) = &changes.description {
            post.description.clone_from(description);
        }
        if let Some(owner) = changes.user_id {
            post.user_id = Some(owner);
        }
        post.updated_at = Utc::now();
        let updated = post.clone();

        Ok(Some(tables.post_with_owner(&updated)))
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut tables = self.tables().map_err(PostRepositoryError::query)?;
        Ok(tables.posts.remove(&id.get()).is_some())
    }
}

#[async_trait]
impl PhoneRepository for InMemoryStore {
    async fn find_by_id(&self, id: PhoneId) -> Result<Option<PhoneWithOwner>, PhoneRepositoryError> {
        let tables = self.tables().map_err(PhoneRepositoryError::query)?;
        let Some(phone) = tables.phones.get(&id.get()) else {
            return Ok(None);
        };
        Ok(tables
            .users
            .get(&phone.user_id.get())
            .map(|owner| PhoneWithOwner {
                phone: phone.clone(),
                owner: owner.clone(),
            }))
    }
}

#[async_trait]
impl RecordLookup for InMemoryStore {
    async fn value_exists(
        &self,
        column: RecordColumn,
        value: &LookupValue,
        ignore_id: Option<i64>,
    ) -> Result<bool, RecordLookupError> {
        let tables = self.tables().map_err(RecordLookupError::query)?;
        let found = match (column, value) {
            (RecordColumn::UserEmail, LookupValue::Text(email)) => {
                tables.email_taken(email, ignore_id)
            }
            (RecordColumn::UserId, LookupValue::Integer(id)) => {
                Some(*id) != ignore_id && tables.users.contains_key(id)
            }
            (RecordColumn::PostTitle, LookupValue::Text(title)) => {
                tables.title_taken(title, ignore_id)
            }
            _ => false,
        };
        Ok(found)
    }
}
