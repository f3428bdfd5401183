//! ProbeUseCase のユースケーステスト
//!
//! 実ホストの代わりに、チェーンの各段を台本どおりに応答するテストダブルで
//! 三値の Outcome と走査の短絡を検証する。

use crate::adapter::NoopLog;
use crate::domain::Outcome;
use crate::error::Error;
use crate::ports::outbound::{
    ApplicationHandle, ManagerHandle, ProjectHandle, ScriptingSurface, SurfaceLoader,
};
use crate::usecase::ProbeUseCase;
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<&'static str>>>;

/// チェーン 1 段の台本
#[derive(Debug, Clone, Copy)]
enum Step {
    Present,
    Absent,
    Fail(&'static str),
}

/// チェーン全体の台本
#[derive(Debug, Clone, Copy)]
struct ChainScript {
    application: Step,
    manager: Step,
    project: Step,
    name: Step,
    name_value: &'static str,
}

impl ChainScript {
    fn all_present(name_value: &'static str) -> Self {
        Self {
            application: Step::Present,
            manager: Step::Present,
            project: Step::Present,
            name: Step::Present,
            name_value,
        }
    }
}

struct FakeLoader {
    script: ChainScript,
    calls: Calls,
    load_error: Option<&'static str>,
}

impl FakeLoader {
    fn new(script: ChainScript, calls: &Calls) -> Self {
        Self {
            script,
            calls: Arc::clone(calls),
            load_error: None,
        }
    }

    fn failing(msg: &'static str, calls: &Calls) -> Self {
        Self {
            script: ChainScript::all_present("unused"),
            calls: Arc::clone(calls),
            load_error: Some(msg),
        }
    }
}

impl SurfaceLoader for FakeLoader {
    fn load(&self) -> Result<Box<dyn ScriptingSurface>, Error> {
        match self.load_error {
            Some(msg) => Err(Error::acquisition(msg)),
            None => Ok(Box::new(FakeSurface {
                script: self.script,
                calls: Arc::clone(&self.calls),
            })),
        }
    }
}

struct FakeSurface {
    script: ChainScript,
    calls: Calls,
}

impl ScriptingSurface for FakeSurface {
    fn application(&self) -> Result<Option<Box<dyn ApplicationHandle>>, Error> {
        self.calls.lock().unwrap().push("application");
        match self.script.application {
            Step::Present => Ok(Some(Box::new(FakeApplication {
                script: self.script,
                calls: Arc::clone(&self.calls),
            }))),
            Step::Absent => Ok(None),
            Step::Fail(msg) => Err(Error::traversal(msg)),
        }
    }
}

struct FakeApplication {
    script: ChainScript,
    calls: Calls,
}

impl ApplicationHandle for FakeApplication {
    fn project_manager(&self) -> Result<Option<Box<dyn ManagerHandle>>, Error> {
        self.calls.lock().unwrap().push("project_manager");
        match self.script.manager {
            Step::Present => Ok(Some(Box::new(FakeManager {
                script: self.script,
                calls: Arc::clone(&self.calls),
            }))),
            Step::Absent => Ok(None),
            Step::Fail(msg) => Err(Error::traversal(msg)),
        }
    }
}

struct FakeManager {
    script: ChainScript,
    calls: Calls,
}

impl ManagerHandle for FakeManager {
    fn current_project(&self) -> Result<Option<Box<dyn ProjectHandle>>, Error> {
        self.calls.lock().unwrap().push("current_project");
        match self.script.project {
            Step::Present => Ok(Some(Box::new(FakeProject {
                script: self.script,
                calls: Arc::clone(&self.calls),
            }))),
            Step::Absent => Ok(None),
            Step::Fail(msg) => Err(Error::traversal(msg)),
        }
    }
}

struct FakeProject {
    script: ChainScript,
    calls: Calls,
}

impl ProjectHandle for FakeProject {
    fn name(&self) -> Result<Option<String>, Error> {
        self.calls.lock().unwrap().push("project_name");
        match self.script.name {
            Step::Present => Ok(Some(self.script.name_value.to_string())),
            Step::Absent => Ok(None),
            Step::Fail(msg) => Err(Error::traversal(msg)),
        }
    }
}

/// 台本でプローブを 1 回実行し、Outcome と呼ばれた操作の列を返す
fn probe_with(script: ChainScript) -> (Outcome, Vec<&'static str>) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let use_case = ProbeUseCase::new(
        Arc::new(FakeLoader::new(script, &calls)),
        Arc::new(NoopLog),
    );
    let outcome = use_case.probe();
    let recorded = calls.lock().unwrap().clone();
    (outcome, recorded)
}

#[test]
fn test_full_chain_yields_found() {
    let (outcome, calls) = probe_with(ChainScript::all_present("MyProject"));
    assert_eq!(outcome.stdout_line(), "MyProject");
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(
        calls,
        vec![
            "application",
            "project_manager",
            "current_project",
            "project_name"
        ]
    );
}

#[test]
fn test_empty_name_is_found_not_not_found() {
    // 「空名のプロジェクト」と「プロジェクトなし」は区別する
    let (outcome, _) = probe_with(ChainScript::all_present(""));
    assert_eq!(outcome, Outcome::Found(crate::domain::ProjectName::new("")));
    assert_eq!(outcome.stdout_line(), "");
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn test_loader_failure_yields_error_without_traversal() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let use_case = ProbeUseCase::new(
        Arc::new(FakeLoader::failing("module not installed", &calls)),
        Arc::new(NoopLog),
    );
    let outcome = use_case.probe();
    assert_eq!(outcome, Outcome::Error("module not installed".to_string()));
    assert_eq!(outcome.stdout_line(), "ERROR:module not installed");
    assert_eq!(outcome.exit_code(), 2);
    assert!(
        calls.lock().unwrap().is_empty(),
        "no chain operation may run after acquisition failure"
    );
}

#[test]
fn test_application_absent_yields_not_found() {
    let (outcome, calls) = probe_with(ChainScript {
        application: Step::Absent,
        ..ChainScript::all_present("unused")
    });
    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(outcome.stdout_line(), "NO_PROJECT");
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(calls, vec!["application"]);
}

#[test]
fn test_manager_absent_short_circuits() {
    let (outcome, calls) = probe_with(ChainScript {
        manager: Step::Absent,
        ..ChainScript::all_present("unused")
    });
    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(calls, vec!["application", "project_manager"]);
}

#[test]
fn test_project_absent_short_circuits() {
    let (outcome, calls) = probe_with(ChainScript {
        project: Step::Absent,
        ..ChainScript::all_present("unused")
    });
    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(
        calls,
        vec!["application", "project_manager", "current_project"]
    );
}

#[test]
fn test_name_absent_yields_not_found() {
    let (outcome, calls) = probe_with(ChainScript {
        name: Step::Absent,
        ..ChainScript::all_present("unused")
    });
    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(calls.len(), 4);
}

#[test]
fn test_traversal_failure_at_application() {
    let (outcome, calls) = probe_with(ChainScript {
        application: Step::Fail("timeout"),
        ..ChainScript::all_present("unused")
    });
    assert_eq!(outcome, Outcome::Error("timeout".to_string()));
    assert_eq!(outcome.stdout_line(), "ERROR:timeout");
    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(calls, vec!["application"]);
}

#[test]
fn test_traversal_failure_at_manager() {
    let (outcome, calls) = probe_with(ChainScript {
        manager: Step::Fail("timeout"),
        ..ChainScript::all_present("unused")
    });
    assert_eq!(outcome.stdout_line(), "ERROR:timeout");
    assert_eq!(calls, vec!["application", "project_manager"]);
}

#[test]
fn test_traversal_failure_at_project() {
    let (outcome, calls) = probe_with(ChainScript {
        project: Step::Fail("timeout"),
        ..ChainScript::all_present("unused")
    });
    assert_eq!(outcome.stdout_line(), "ERROR:timeout");
    assert_eq!(
        calls,
        vec!["application", "project_manager", "current_project"]
    );
}

#[test]
fn test_traversal_failure_at_name() {
    let (outcome, calls) = probe_with(ChainScript {
        name: Step::Fail("timeout"),
        ..ChainScript::all_present("unused")
    });
    assert_eq!(outcome.stdout_line(), "ERROR:timeout");
    assert_eq!(calls.len(), 4);
}

#[test]
fn test_every_scenario_yields_exactly_one_outcome() {
    // 三値のどれか 1 つに必ず落ちる（部分的な結果は型の上で存在しない）
    let scenarios = [
        ChainScript::all_present("P"),
        ChainScript {
            application: Step::Absent,
            ..ChainScript::all_present("P")
        },
        ChainScript {
            manager: Step::Fail("boom"),
            ..ChainScript::all_present("P")
        },
        ChainScript {
            name: Step::Absent,
            ..ChainScript::all_present("P")
        },
    ];
    for script in scenarios {
        let (outcome, _) = probe_with(script);
        let code = outcome.exit_code();
        assert!((0..=2).contains(&code));
        // stdout_line は終了コードと整合する
        match code {
            0 => assert!(!outcome.stdout_line().starts_with("ERROR:")),
            1 => assert_eq!(outcome.stdout_line(), "NO_PROJECT"),
            _ => assert!(outcome.stdout_line().starts_with("ERROR:")),
        }
    }
}
