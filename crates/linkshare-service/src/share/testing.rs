//! Shared fixtures for the share service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use futures::StreamExt;
use tempfile::TempDir;

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::{ByteStream, FileModes, FileSystem};
use linkshare_core::traits::{RandomSource, SecretHasher};
use linkshare_core::types::UserId;
use linkshare_database::{ShareRepository, ShareStore, UserRepository, UserStore};
use linkshare_entity::share::{ShareLink, SharePermission};
use linkshare_entity::user::{User, UserRole};
use linkshare_storage::StorageManager;
use linkshare_storage::providers::LocalFileSystem;

use super::pipeline::SharedResourceContext;
use super::scope::ScopeBinder;
use crate::context::RequestContext;

pub fn share_store() -> Arc<dyn ShareStore> {
    Arc::new(ShareRepository::new())
}

pub fn link(path: &str) -> ShareLink {
    link_owned_by(path, UserId::new())
}

pub fn link_owned_by(path: &str, owner: UserId) -> ShareLink {
    ShareLink {
        hash: UserId::new().to_string().replace('-', "")[..8].to_string(),
        path: path.to_string(),
        user_id: owner,
        expire: 0,
        password_hash: String::new(),
        token: String::new(),
        is_public: false,
        permission: None,
        allowed_users: Vec::new(),
    }
}

/// Reversible "hash" so tests can build stored hashes without argon2.
#[derive(Debug)]
pub struct FakeHasher;

impl SecretHasher for FakeHasher {
    fn hash(&self, secret: &str) -> AppResult<String> {
        Ok(format!("fake${secret}"))
    }

    fn verify(&self, secret: &str, hash: &str) -> AppResult<bool> {
        match hash.strip_prefix("fake$") {
            Some(expected) => Ok(expected == secret),
            None => Err(AppError::internal("Unsupported hash format")),
        }
    }
}

/// Deterministic random source; every call yields different bytes.
#[derive(Debug, Default)]
pub struct SeqRandom {
    calls: AtomicU64,
}

impl RandomSource for SeqRandom {
    fn fill(&self, buf: &mut [u8]) -> AppResult<()> {
        let seed = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        for (i, b) in buf.iter_mut().enumerate() {
            let mixed = seed
                .wrapping_mul(0x9E37_79B9_7F4A_7C15)
                .rotate_left((i % 64) as u32);
            *b = (mixed >> ((i % 8) * 8)) as u8 ^ i as u8;
        }
        Ok(())
    }
}

fn user(username: &str, display_name: Option<&str>, role: UserRole, scope: &str) -> User {
    User {
        id: UserId::new(),
        username: username.to_string(),
        display_name: display_name.map(str::to_string),
        role,
        scope: scope.to_string(),
        can_share: true,
    }
}

fn body(data: &'static [u8]) -> ByteStream {
    Box::pin(futures::stream::once(async move {
        Ok::<_, std::io::Error>(Bytes::from_static(data))
    }))
}

/// A temporary storage root with three users. The owner's filesystem holds
/// `/docs/{a.txt, b.md, sub/blob}` and a sibling `/secret.txt`.
pub struct Fixture {
    _dir: TempDir,
    pub storage: Arc<StorageManager>,
    pub users: Arc<dyn UserStore>,
    pub shares: Arc<dyn ShareStore>,
    pub owner: User,
    pub other: User,
    pub admin: User,
}

impl Fixture {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root: Arc<dyn FileSystem> = Arc::new(LocalFileSystem::new(dir.path()).await.unwrap());
        let storage = Arc::new(StorageManager::new(root));
        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new());

        let owner = user("alice", Some("Alice"), UserRole::User, "/users/alice");
        let other = user("bob", None, UserRole::User, "/users/bob");
        let admin = user("root", None, UserRole::Admin, "/");
        for u in [&owner, &other, &admin] {
            storage.ensure_scope(u, 0o750).await.unwrap();
            users.insert(u.clone()).await.unwrap();
        }

        let fs = storage.user_fs(&owner).await;
        let modes = FileModes::default();
        for (path, data) in [
            ("/docs/a.txt", &b"alpha"[..]),
            ("/docs/b.md", &b"# bravo"[..]),
            ("/docs/sub/blob", &b"%PDF-1.4\n%binary"[..]),
            ("/secret.txt", &b"top secret"[..]),
        ] {
            fs.write_stream(path, body(data), modes).await.unwrap();
        }

        Self {
            _dir: dir,
            storage,
            users,
            shares: share_store(),
            owner,
            other,
            admin,
        }
    }

    pub async fn owner_fs(&self) -> Arc<dyn FileSystem> {
        self.storage.user_fs(&self.owner).await
    }

    pub fn owner_caller(&self) -> RequestContext {
        RequestContext::from_user(&self.owner)
    }

    /// A regular user who does not own the fixture's links.
    pub fn caller(&self) -> RequestContext {
        RequestContext::from_user(&self.other)
    }

    pub fn admin_caller(&self) -> RequestContext {
        RequestContext::from_user(&self.admin)
    }

    /// Write context for a public `change` link to `link_path`.
    pub async fn write_context(&self, link_path: &str, sub_path: &str) -> SharedResourceContext {
        let mut link = link_owned_by(link_path, self.owner.id);
        link.publish(SharePermission::Change, vec![]);
        let scope = ScopeBinder::new(false)
            .bind(&link, self.owner_fs().await)
            .await
            .unwrap();
        SharedResourceContext {
            link,
            sub_path: sub_path.to_string(),
            scope,
            owner: self.owner.clone(),
            caller: self.caller(),
        }
    }

    pub async fn read_owner(&self, path: &str) -> String {
        let mut stream = self.owner_fs().await.read(path).await.unwrap();
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        String::from_utf8(out).unwrap()
    }
}
