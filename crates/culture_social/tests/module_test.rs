//! Tests for module lifecycle.

mod test_utils;

use async_trait::async_trait;
use culture_social::{
    CultureModule, DiscordError, DiscordErrorKind, DiscordResult, Module, ModuleContext,
    ModuleRegistry,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use test_utils::registry;

/// Records lifecycle calls into a shared journal.
struct Recorder {
    name: &'static str,
    fail: bool,
    journal: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn new(name: &'static str, fail: bool, journal: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            name,
            fail,
            journal: Arc::clone(journal),
        })
    }
}

#[async_trait]
impl Module for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    async fn init(&self, _context: &mut ModuleContext) -> DiscordResult<()> {
        self.journal.lock().push(format!("init {}", self.name));
        if self.fail {
            return Err(DiscordError::new(DiscordErrorKind::ModuleInit {
                module: self.name.to_string(),
                reason: "refused".to_string(),
            }));
        }
        Ok(())
    }

    async fn dispose(&self) {
        self.journal.lock().push(format!("dispose {}", self.name));
    }
}

#[tokio::test]
async fn test_failed_module_is_skipped_and_not_disposed() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let mut modules = ModuleRegistry::new();
    modules.register(Recorder::new("first", false, &journal));
    modules.register(Recorder::new("broken", true, &journal));
    modules.register(Recorder::new("last", false, &journal));

    modules.init_all().await;
    assert_eq!(modules.initialized(), vec!["first", "last"]);

    modules.dispose_all().await;
    assert_eq!(
        *journal.lock(),
        vec![
            "init first",
            "init broken",
            "init last",
            "dispose last",
            "dispose first"
        ]
    );
    assert!(modules.initialized().is_empty());
}

#[tokio::test]
async fn test_culture_module_contributes_both_commands() {
    let mut modules = ModuleRegistry::new();
    modules.register(Arc::new(CultureModule::new(registry(Vec::new()), None)));

    let commands = modules.init_all().await;

    assert_eq!(commands.names(), vec!["culture", "favorites"]);
    assert!(commands.find("culture").is_some());
    assert!(commands.find("ping").is_none());
}

#[tokio::test]
async fn test_sweeper_runs_until_dispose() {
    let module = CultureModule::new(registry(Vec::new()), Some(Duration::from_secs(60)));
    assert!(!module.is_sweeping());

    let mut context = ModuleContext::new();
    module.init(&mut context).await.unwrap();
    assert!(module.is_sweeping());
    assert_eq!(context.commands().len(), 2);

    module.dispose().await;
    assert!(!module.is_sweeping());
}

#[tokio::test]
async fn test_zero_sweep_interval_fails_init() {
    let module = CultureModule::new(registry(Vec::new()), Some(Duration::ZERO));
    let mut context = ModuleContext::new();

    let err = module.init(&mut context).await.unwrap_err();
    assert!(matches!(err.kind(), DiscordErrorKind::ModuleInit { .. }));
    assert!(context.commands().is_empty());
}
