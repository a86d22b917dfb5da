use std::sync::Arc;

/// Aggregates every adapter the domain services need.
///
/// The service traits (`StylingService`, `OutfitService`) are implemented on
/// this struct in their own domain modules.
pub struct Service<GC, CE, LLM, US> {
    pub(crate) classifier: Arc<GC>,
    pub(crate) color_extractor: Arc<CE>,
    pub(crate) llm_client: Option<Arc<LLM>>,
    pub(crate) upload_store: Arc<US>,
}

impl<GC, CE, LLM, US> Service<GC, CE, LLM, US> {
    pub fn new(
        classifier: GC,
        color_extractor: CE,
        llm_client: Option<LLM>,
        upload_store: US,
    ) -> Self {
        Self {
            classifier: Arc::new(classifier),
            color_extractor: Arc::new(color_extractor),
            llm_client: llm_client.map(Arc::new),
            upload_store: Arc::new(upload_store),
        }
    }

    pub fn is_advisor_configured(&self) -> bool {
        self.llm_client.is_some()
    }
}

impl<GC, CE, LLM, US> Clone for Service<GC, CE, LLM, US> {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            color_extractor: Arc::clone(&self.color_extractor),
            llm_client: self.llm_client.clone(),
            upload_store: Arc::clone(&self.upload_store),
        }
    }
}
