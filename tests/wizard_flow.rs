use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Map;

use wsctl::api::{ApiError, CatalogService, ProvisioningService};
use wsctl::models::{
    BuildImage, CreateWorkspaceRequest, CreatedWorkspace, ImageQuery, OperatingSystem, Step, Template,
    TshirtSize, Workspace, WorkspaceKind,
};
use wsctl::services::{NoticeKind, RecordingNavigator, RecordingNotifier};
use wsctl::wizard::{
    EventRejected, Field, ImageFetchOutcome, SubmitBlocked, WizardController, WizardEvent, WizardSession,
};

const PROJECT: &str = "proj-1";
const CREATOR: &str = "dev@example.com";

fn template(id: &str, name: &str, kind: &str) -> Template {
    Template {
        id: id.into(),
        name: name.into(),
        template_type: kind.into(),
        created_at: String::new(),
    }
}

fn image(name: &str, kind: &str) -> BuildImage {
    BuildImage {
        name: name.into(),
        image_type: kind.into(),
        reference: format!("reg/{}", name.to_lowercase().replace(' ', "-")),
    }
}

fn templates() -> Vec<Template> {
    vec![
        template("tpl-python", "Python", "ide"),
        template("tpl-ubuntu", "Ubuntu Desktop", "linux_cnv"),
        template("tpl-win", "Windows Server", "windows_cnv"),
    ]
}

fn sizes() -> Vec<TshirtSize> {
    vec![TshirtSize {
        size_code: "S".into(),
        cpu: "2".into(),
        memory: "4".into(),
    }]
}

/// In-memory backend that records what the wizard asked for.
#[derive(Clone)]
struct FakeBackend {
    templates: Result<Vec<Template>, ApiError>,
    sizes: Result<Vec<TshirtSize>, ApiError>,
    images: Vec<BuildImage>,
    create_error: Option<ApiError>,
    image_queries: Arc<Mutex<Vec<ImageQuery>>>,
    created: Arc<Mutex<Vec<CreateWorkspaceRequest>>>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            templates: Ok(templates()),
            sizes: Ok(sizes()),
            images: vec![
                image("Python 3.12", "ide"),
                image("Ubuntu 22.04", "linux_cnv"),
                image("Windows 2022", "windows_cnv"),
            ],
            create_error: None,
            image_queries: Arc::new(Mutex::new(Vec::new())),
            created: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn image_queries(&self) -> Vec<ImageQuery> {
        self.image_queries.lock().unwrap().clone()
    }

    fn created(&self) -> Vec<CreateWorkspaceRequest> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogService for FakeBackend {
    async fn list_templates(&self, _project_id: &str) -> Result<Vec<Template>, ApiError> {
        self.templates.clone()
    }

    async fn list_tshirt_sizes(&self) -> Result<Vec<TshirtSize>, ApiError> {
        self.sizes.clone()
    }

    async fn list_images(&self, query: &ImageQuery) -> Result<Vec<BuildImage>, ApiError> {
        self.image_queries.lock().unwrap().push(query.clone());
        Ok(self.images.clone())
    }
}

#[async_trait]
impl ProvisioningService for FakeBackend {
    async fn create_workspace(&self, request: &CreateWorkspaceRequest) -> Result<CreatedWorkspace, ApiError> {
        self.created.lock().unwrap().push(request.clone());
        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }
        Ok(CreatedWorkspace {
            workspace: Workspace {
                id: request.id.clone(),
                name: request.name.clone(),
                status: Some("provisioning".into()),
                extra: Map::new(),
            },
            message: format!("Workspace {} created", request.name),
        })
    }
}

type Controller = WizardController<FakeBackend, RecordingNotifier, RecordingNavigator>;

async fn mounted(backend: FakeBackend) -> (Controller, RecordingNotifier, RecordingNavigator) {
    let notifier = RecordingNotifier::new();
    let navigator = RecordingNavigator::new();
    let mut controller = WizardController::new(backend, notifier.clone(), navigator.clone(), PROJECT, CREATOR);
    controller.mount().await;
    (controller, notifier, navigator)
}

async fn walk_to_compute(controller: &mut Controller) {
    assert!(controller.dispatch(WizardEvent::RenameWorkspace("My Workspace".into())).await);
    assert!(controller.dispatch(WizardEvent::SelectTemplate("tpl-python".into())).await);
    assert!(controller.dispatch(WizardEvent::Next).await);
    assert!(controller.dispatch(WizardEvent::SelectImage("reg/python-3.12".into())).await);
    assert!(controller.dispatch(WizardEvent::Next).await);
}

#[tokio::test]
async fn custom_size_workspace_is_created_and_handed_to_navigation() {
    let backend = FakeBackend::new();
    let (mut controller, notifier, navigator) = mounted(backend.clone()).await;

    walk_to_compute(&mut controller).await;
    assert_eq!(controller.session().draft().id, "my-workspace");
    assert_eq!(controller.session().draft().tfconfig.image_name, "Python 3.12");
    assert_eq!(
        backend.image_queries(),
        vec![ImageQuery {
            project_id: PROJECT.into(),
            workspace_kind: WorkspaceKind::Ide,
            build_kind: Default::default(),
            os_filter: None,
        }]
    );

    assert!(controller.dispatch(WizardEvent::SetTshirtSize("TX".into())).await);
    assert!(controller.session().sizing_editable());
    assert!(controller.dispatch(WizardEvent::SetCpu("3".into())).await);
    assert!(controller.dispatch(WizardEvent::SetMemory("8".into())).await);
    assert!(controller.dispatch(WizardEvent::SetDrive("40".into())).await);
    assert!(controller.session().can_submit());
    assert!(!controller.session().can_advance());
    assert!(controller.dispatch(WizardEvent::Next).await);
    assert_eq!(controller.session().step(), Step::Compute);

    let created = controller.submit().await.expect("workspace created");
    assert_eq!(created.workspace.id, "my-workspace");

    let sent = backend.created();
    assert_eq!(sent.len(), 1);
    let body = serde_json::to_value(&sent[0]).unwrap();
    assert_eq!(body["tfconfig"]["cpu"], 3);
    assert_eq!(body["tfconfig"]["memory"], 8);
    assert_eq!(body["tfconfig"]["drive"], 40);
    assert_eq!(body["tshirt_size"], "TX");
    assert!(body.get("workspace_type").is_none());
    assert!(body.get("build_type").is_none());
    assert!(body.get("step").is_none());

    assert_eq!(
        notifier.last(),
        Some((NoticeKind::Success, "Workspace My Workspace created".to_string()))
    );
    let visits = navigator.visits();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].0, "/projects/proj-1/workspaces");
    assert_eq!(visits[0].1.id, "my-workspace");

    let fresh = controller.session().draft();
    assert!(fresh.name.is_empty());
    assert_eq!(fresh.step, Step::Template);
    assert_eq!(fresh.project_id, PROJECT);
    assert_eq!(fresh.created_by, CREATOR);
}

#[tokio::test]
async fn failed_submit_keeps_draft_and_reports_backend_message() {
    let mut backend = FakeBackend::new();
    backend.create_error = Some(ApiError::Status {
        status: 409,
        message: "Workspace my-workspace already exists".into(),
    });
    let (mut controller, notifier, navigator) = mounted(backend).await;

    walk_to_compute(&mut controller).await;
    assert!(controller.dispatch(WizardEvent::SetTshirtSize("S".into())).await);
    assert!(controller.dispatch(WizardEvent::SetDrive("20".into())).await);

    assert!(controller.submit().await.is_none());
    assert_eq!(
        notifier.last(),
        Some((NoticeKind::Error, "Workspace my-workspace already exists".to_string()))
    );
    assert!(navigator.visits().is_empty());

    let session = controller.session();
    assert!(!session.is_submitting());
    assert_eq!(session.step(), Step::Compute);
    assert_eq!(session.draft().name, "My Workspace");
    assert_eq!(session.draft().tfconfig.cpu, "2");
    assert!(session.can_submit());
}

#[tokio::test]
async fn catalog_failure_notifies_and_blocks_template_selection() {
    let mut backend = FakeBackend::new();
    backend.templates = Err(ApiError::Network("connection refused".into()));
    let (mut controller, notifier, _) = mounted(backend).await;

    assert_eq!(
        notifier.notices().first(),
        Some(&(NoticeKind::Error, "Request failed: connection refused".to_string()))
    );
    assert!(controller.session().catalog().templates().is_empty());
    assert_eq!(controller.session().catalog().tshirt_sizes().len(), 1);

    assert!(!controller.dispatch(WizardEvent::SelectTemplate("tpl-python".into())).await);
    assert_eq!(notifier.last().map(|(kind, _)| kind), Some(NoticeKind::Warning));
    assert!(controller.session().draft().template_id.is_empty());
}

#[tokio::test]
async fn cnv_template_lists_only_images_for_its_os() {
    let backend = FakeBackend::new();
    let (mut controller, _, _) = mounted(backend.clone()).await;

    assert!(controller.dispatch(WizardEvent::SelectTemplate("tpl-win".into())).await);
    let session = controller.session();
    assert_eq!(session.draft().workspace_type, WorkspaceKind::Cnv);
    assert_eq!(session.draft().tfconfig.os, OperatingSystem::Windows);
    let names: Vec<&str> = session.available_images().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Windows 2022"]);
    assert_eq!(backend.image_queries()[0].os_filter, Some(OperatingSystem::Windows));
}

#[tokio::test]
async fn schedule_toggle_seeds_defaults_and_moves_submit() {
    let (mut controller, _, _) = mounted(FakeBackend::new()).await;
    walk_to_compute(&mut controller).await;
    assert!(controller.dispatch(WizardEvent::SetTshirtSize("S".into())).await);
    assert!(controller.dispatch(WizardEvent::SetDrive("20".into())).await);

    assert!(controller.dispatch(WizardEvent::ToggleSchedule(true)).await);
    let draft = controller.session().draft();
    assert_eq!(draft.start_cron_expression.as_deref(), Some("30 6 * * 1-5"));
    assert_eq!(draft.stop_cron_expression.as_deref(), Some("30 14 * * 1-5"));
    assert!(!controller.session().submit_visible());

    let blocked = controller.submit().await;
    assert!(blocked.is_none());

    assert!(controller.dispatch(WizardEvent::Next).await);
    assert_eq!(controller.session().step(), Step::Scheduler);
    assert!(controller.session().can_submit());
}

#[test]
fn superseded_image_listings_are_dropped() {
    let mut session = WizardSession::new(PROJECT, CREATOR);
    session.receive_templates(PROJECT, templates());

    let mut queries = Vec::new();
    for id in ["tpl-ubuntu", "tpl-win", "tpl-ubuntu"] {
        let effects = session.apply(WizardEvent::SelectTemplate(id.into())).unwrap();
        match &effects[..] {
            [wsctl::wizard::Effect::RefreshImages(q)] => queries.push(q.clone()),
            other => panic!("unexpected effects {:?}", other),
        }
    }
    let all = vec![
        image("Ubuntu 22.04", "linux_cnv"),
        image("Windows 2022", "windows_cnv"),
    ];

    assert_eq!(session.receive_images(&queries[1], Ok(all.clone())), ImageFetchOutcome::Stale);
    assert_eq!(session.receive_images(&queries[2], Ok(all.clone())), ImageFetchOutcome::Applied(1));
    assert_eq!(session.receive_images(&queries[0], Ok(all)), ImageFetchOutcome::Stale);

    let names: Vec<&str> = session.available_images().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Ubuntu 22.04"]);
}

#[test]
fn submit_is_single_flight() {
    let mut session = WizardSession::new(PROJECT, CREATOR);
    session.receive_templates(PROJECT, templates());
    session.receive_tshirt_sizes(sizes());
    session.apply(WizardEvent::RenameWorkspace("demo".into())).unwrap();
    session.apply(WizardEvent::SelectTemplate("tpl-python".into())).unwrap();
    let query = session.image_query();
    session.receive_images(&query, Ok(vec![image("Python 3.12", "ide")]));
    session.apply(WizardEvent::Next).unwrap();
    session.apply(WizardEvent::SelectImage("reg/python-3.12".into())).unwrap();
    session.apply(WizardEvent::Next).unwrap();
    session.apply(WizardEvent::SetTshirtSize("S".into())).unwrap();
    session.apply(WizardEvent::SetDrive("10".into())).unwrap();

    let request = session.begin_submit().expect("first submit starts");
    assert_eq!(request.id, "demo");
    assert_eq!(session.begin_submit().unwrap_err(), SubmitBlocked::InFlight);
    assert!(!session.can_submit());
    assert_eq!(
        session.apply(WizardEvent::Previous).unwrap_err(),
        EventRejected::SubmitInFlight
    );

    session.finish_submit(false);
    assert!(session.can_submit());
}

#[test]
fn step_gates_follow_required_fields() {
    let mut session = WizardSession::new(PROJECT, CREATOR);
    session.receive_templates(PROJECT, templates());
    assert!(!session.can_advance());
    assert!(!session.can_go_back());
    assert_eq!(
        session.apply(WizardEvent::Next).unwrap_err(),
        EventRejected::StepIncomplete(Step::Template)
    );

    session.apply(WizardEvent::RenameWorkspace("demo".into())).unwrap();
    session.apply(WizardEvent::SelectTemplate("tpl-python".into())).unwrap();
    assert!(session.can_advance());
    session.apply(WizardEvent::Next).unwrap();
    assert_eq!(session.step(), Step::Image);
    assert!(!session.can_advance());

    assert_eq!(
        session.apply(WizardEvent::JumpTo(Step::Scheduler)).unwrap_err(),
        EventRejected::StepIncomplete(Step::Image)
    );
    session.apply(WizardEvent::JumpTo(Step::Template)).unwrap();
    assert_eq!(session.step(), Step::Template);
}

#[tokio::test]
async fn fractional_custom_sizes_block_submit() {
    let backend = FakeBackend::new();
    let (mut controller, notifier, _) = mounted(backend.clone()).await;
    walk_to_compute(&mut controller).await;
    assert!(controller.dispatch(WizardEvent::SetTshirtSize("TX".into())).await);
    assert!(controller.dispatch(WizardEvent::SetCpu("1e3".into())).await);
    assert!(controller.dispatch(WizardEvent::SetMemory("2.5".into())).await);
    assert!(controller.dispatch(WizardEvent::SetDrive("20".into())).await);

    assert!(!controller.session().can_submit());
    assert!(controller.submit().await.is_none());
    assert!(backend.created().is_empty());
    assert_eq!(notifier.last().map(|(kind, _)| kind), Some(NoticeKind::Warning));
}

#[test]
fn invalid_name_is_reported_without_blocking_typing() {
    let mut session = WizardSession::new(PROJECT, CREATOR);
    session.apply(WizardEvent::RenameWorkspace("9 lives".into())).unwrap();
    assert_eq!(session.draft().id, "9-lives");
    let report = session.validation();
    assert!(report.error(Field::Name).is_some());
    assert!(!report.is_valid());
}
