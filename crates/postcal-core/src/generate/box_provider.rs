//! BoxTextProvider -- object-safe dynamic dispatch wrapper for TextProvider.
//!
//! 1. Define an object-safe `TextProviderDyn` trait with boxed futures
//! 2. Blanket-impl `TextProviderDyn` for all `T: TextProvider`
//! 3. `BoxTextProvider` wraps `Box<dyn TextProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use postcal_types::generate::{PromptSpec, ProviderError};

use super::provider::TextProvider;

/// Object-safe version of [`TextProvider`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch (`dyn TextProviderDyn`).
/// A blanket implementation is provided for all types implementing `TextProvider`.
pub trait TextProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        spec: &'a PromptSpec,
    ) -> Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>>;
}

/// Blanket implementation: any `TextProvider` automatically implements `TextProviderDyn`.
impl<T: TextProvider> TextProviderDyn for T {
    fn name(&self) -> &str {
        TextProvider::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        spec: &'a PromptSpec,
    ) -> Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>> {
        Box::pin(self.complete(spec))
    }
}

/// Type-erased text provider, so the generator can hold whichever backend
/// the configuration selected without being generic over it.
pub struct BoxTextProvider {
    inner: Box<dyn TextProviderDyn>,
}

impl BoxTextProvider {
    /// Wrap a concrete provider behind dynamic dispatch.
    pub fn new<T: TextProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl TextProvider for BoxTextProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(&self, spec: &PromptSpec) -> Result<String, ProviderError> {
        self.inner.complete_boxed(spec).await
    }
}
