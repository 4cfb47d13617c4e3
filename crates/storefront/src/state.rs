//! Application state shared across handlers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mittens_core::ProductCatalog;
use moka::future::Cache;
use uuid::Uuid;

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::widget::{StoreRoot, WidgetError};

/// Upper bound on live widget instances.
const MAX_WIDGETS: u64 = 10_000;

/// Widgets untouched for this long are dropped.
const WIDGET_IDLE: Duration = Duration::from_secs(30 * 60);

type SharedWidget = Arc<Mutex<StoreRoot>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Every page load mounts its own
/// widget, keyed by a random id that the rendered markup carries back on each
/// interaction. Widgets live only in memory and expire when idle.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: ProductCatalog,
    widgets: Cache<Uuid, SharedWidget>,
}

impl AppState {
    /// Create a new application state serving `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot back a product view.
    pub fn new(config: StorefrontConfig, catalog: ProductCatalog) -> Result<Self, WidgetError> {
        catalog.validate()?;

        let widgets = Cache::builder()
            .max_capacity(MAX_WIDGETS)
            .time_to_idle(WIDGET_IDLE)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                widgets,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Mount a fresh widget and run `f` against it, with its new id, before
    /// it is shared.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Widget`] if the catalog cannot back a product view.
    pub async fn mount<R>(&self, f: impl FnOnce(Uuid, &StoreRoot) -> R) -> Result<R, AppError> {
        let store = StoreRoot::new(self.inner.catalog.clone(), self.inner.config.premium)?;
        let id = Uuid::new_v4();
        let out = f(id, &store);

        self.inner
            .widgets
            .insert(id, Arc::new(Mutex::new(store)))
            .await;
        tracing::debug!(widget = %id, "widget registered");

        Ok(out)
    }

    /// Run `f` against the widget `id` while holding its lock.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown or expired widget, and
    /// [`AppError::Internal`] if an earlier handler panicked while holding
    /// the lock.
    pub async fn with_widget<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut StoreRoot) -> R,
    ) -> Result<R, AppError> {
        let widget = self
            .inner
            .widgets
            .get(&id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("widget {id}")))?;

        let mut store = widget
            .lock()
            .map_err(|_| AppError::Internal("widget state lock poisoned".to_string()))?;
        Ok(f(&mut store))
    }

    /// Like [`with_widget`](Self::with_widget) for operations that can fail.
    ///
    /// # Errors
    ///
    /// Returns the operation's error converted into an [`AppError`], or any
    /// error [`with_widget`](Self::with_widget) returns.
    pub async fn try_with_widget<R, E>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut StoreRoot) -> Result<R, E>,
    ) -> Result<R, AppError>
    where
        AppError: From<E>,
    {
        self.with_widget(id, f).await?.map_err(AppError::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mittens_core::CatalogError;

    use super::*;

    fn config() -> StorefrontConfig {
        StorefrontConfig::from_lookup(|key| (key == "MITTENS_PREMIUM").then(|| "true".to_string()))
            .unwrap()
    }

    fn state() -> AppState {
        AppState::new(config(), ProductCatalog::mittens()).unwrap()
    }

    #[test]
    fn test_empty_catalog_is_rejected_at_startup() {
        let mut catalog = ProductCatalog::mittens();
        catalog.variants.clear();

        let err = AppState::new(config(), catalog).err().unwrap();
        assert!(matches!(err, WidgetError::Catalog(CatalogError::NoVariants(_))));
    }

    #[tokio::test]
    async fn test_premium_flows_into_widget() {
        let shipping = state()
            .mount(|_, store| store.product().shipping().to_string())
            .await
            .unwrap();
        assert_eq!(shipping, "Free");
    }

    #[tokio::test]
    async fn test_mounts_are_independent() {
        let state = state();
        let first = state.mount(|id, _| id).await.unwrap();
        let second = state.mount(|id, _| id).await.unwrap();
        assert_ne!(first, second);

        state
            .try_with_widget(first, StoreRoot::add_selected_to_cart)
            .await
            .unwrap();

        let clone = state.clone();
        assert_eq!(clone.with_widget(first, |s| s.cart().len()).await.unwrap(), 1);
        assert_eq!(clone.with_widget(second, |s| s.cart().len()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_widget_is_not_found() {
        let err = state()
            .with_widget(Uuid::new_v4(), |s| s.cart().len())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
