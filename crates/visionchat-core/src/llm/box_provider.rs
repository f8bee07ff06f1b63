//! BoxMultimodalProvider -- object-safe dynamic dispatch wrapper.
//!
//! 1. `MultimodalProviderDyn` is the object-safe mirror with boxed futures
//! 2. it is blanket-implemented for every `T: MultimodalProvider`
//! 3. `BoxMultimodalProvider` wraps `Box<dyn MultimodalProviderDyn>` and
//!    implements `MultimodalProvider` itself, so it plugs into generic code

use std::future::Future;
use std::pin::Pin;

use visionchat_types::llm::{GenerationRequest, GenerationResponse, LlmError};

use super::provider::MultimodalProvider;

/// Object-safe version of [`MultimodalProvider`].
pub trait MultimodalProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResponse, LlmError>> + Send + 'a>>;
}

impl<T: MultimodalProvider> MultimodalProviderDyn for T {
    fn name(&self) -> &str {
        MultimodalProvider::name(self)
    }

    fn model(&self) -> &str {
        MultimodalProvider::model(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResponse, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(request))
    }
}

/// Type-erased provider chosen at runtime from configuration.
pub struct BoxMultimodalProvider {
    inner: Box<dyn MultimodalProviderDyn + Send + Sync>,
}

impl BoxMultimodalProvider {
    /// Wrap a concrete provider in a type-erased box.
    pub fn new<T: MultimodalProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }
}

impl MultimodalProvider for BoxMultimodalProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LlmError> {
        self.inner.generate_boxed(request).await
    }
}
