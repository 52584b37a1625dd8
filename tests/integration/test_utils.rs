//! Shared test utilities for integration tests
//!
//! Centralized setup for XDG directories and document fixtures so config
//! loading never reads the developer's real `~/.config/statescope`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

const CAPTURED_VARS: [&str; 3] = ["HOME", "XDG_CONFIG_HOME", "STATESCOPE_ENV"];

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            vars: CAPTURED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.vars {
            match value {
                Some(orig) => std::env::set_var(name, orig),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointed into `test_dir`
///
/// `STATESCOPE_ENV` is cleared so the workspace profile defaults to
/// `development`. The original environment is restored afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("xdg");
    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_config_home).unwrap();
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());
    std::env::remove_var("STATESCOPE_ENV");

    let result = f();

    env_state.restore();

    result
}

pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// App with a widget id shared by the global and page trees, nested
/// children, a query, and a transformer
pub const APP_JSON: &str = r#"{
  "pages": [
    {
      "id": "p1",
      "name": "Home",
      "widgets": [
        {"id": "w1", "type": "textInput", "properties": {"value": "page copy"}},
        {"id": "nameInput", "type": "textInput",
         "properties": {"value": "{{ Users.data[0].name }}", "placeholder": 42}},
        {"id": "form", "type": "container", "children": [
          {"id": "agree", "type": "checkbox", "properties": {"value": ""}}
        ]}
      ],
      "pageGlobalWidgets": [{"id": "sidebar", "type": "container"}]
    }
  ],
  "globalWidgets": [
    {"id": "w1", "type": "text", "properties": {"value": "global copy"}}
  ],
  "queries": [{"id": "q1", "name": "Users", "type": "rest", "config": {}}],
  "transformers": [{"id": "t1", "name": "firstUser", "source": "{{ Users.data[0].name }}"}]
}"#;

pub const EDITOR_JSON: &str = r#"{
  "selection": {"widgetId": "nameInput", "activePageId": "p1"},
  "queryResults": {
    "q1": {"status": "success", "data": [{"name": "Grace"}], "receivedAt": "2024-05-01T12:00:00Z"}
  },
  "facts": {
    "currentUser": {"email": "ada@example.com"},
    "viewport": {"width": 1280, "height": 720}
  },
  "refreshCounter": 0
}"#;
