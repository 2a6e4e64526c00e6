use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use super::*;
use crate::api::models::SensorData;

const PATHS: [&str; 5] = ["/dummy", "/", "/Sensor", "/Settings", "/Webcam"];

fn table() -> RouteTable {
    RouteTable::fermentation(BasePath::default()).unwrap()
}

fn route(path: &str) -> Route {
    table().resolve(path).unwrap().clone()
}

fn bundle(view: ViewId) -> View {
    match view {
        ViewId::Home => View::Home,
        ViewId::Sensor => View::Sensor(Rc::new(SensorBundle {
            current: SensorData { temp: 29.5, hum: 78.0 },
            history: Vec::new(),
            fetched_at: chrono::DateTime::UNIX_EPOCH,
        })),
        ViewId::Settings => View::Settings(Rc::new(SettingsBundle { projects: Vec::new() })),
        ViewId::Webcam => View::Webcam(Rc::new(WebcamBundle {
            projects: Vec::new(),
            api_url: "http://pi".into(),
        })),
    }
}

/// Resolves every fetch immediately.
#[derive(Clone, Default)]
struct InstantLoader {
    fetches: Rc<Cell<usize>>,
}

impl ViewLoader for InstantLoader {
    fn fetch(&self, view: ViewId) -> LocalBoxFuture<'static, Result<View, LoadFailure>> {
        self.fetches.set(self.fetches.get() + 1);
        futures::future::ready(Ok(bundle(view))).boxed_local()
    }
}

type Gate = oneshot::Sender<Result<View, LoadFailure>>;

/// Holds every fetch open until the test releases it.
#[derive(Clone, Default)]
struct GatedLoader {
    gates: Rc<RefCell<Vec<(ViewId, Gate)>>>,
    fetches: Rc<Cell<usize>>,
}

impl GatedLoader {
    fn release(&self, view: ViewId, result: Result<View, LoadFailure>) {
        let mut gates = self.gates.borrow_mut();
        let index = gates
            .iter()
            .position(|(v, _)| *v == view)
            .expect("no fetch in flight for view");
        let (_, gate) = gates.remove(index);
        let _ = gate.send(result);
    }
}

impl ViewLoader for GatedLoader {
    fn fetch(&self, view: ViewId) -> LocalBoxFuture<'static, Result<View, LoadFailure>> {
        self.fetches.set(self.fetches.get() + 1);
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push((view, tx));
        async move {
            rx.await
                .unwrap_or_else(|_| Err(LoadFailure::new(view, "gate dropped")))
        }
        .boxed_local()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Loading(String),
    Rendered(String, ViewId),
    NotFound(NotFound),
    Failed(String, LoadFailure),
}

#[derive(Default)]
struct RecordingHost {
    events: RefCell<Vec<Event>>,
}

impl RecordingHost {
    fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl RenderHost for RecordingHost {
    fn loading(&self, route: &Route) {
        self.events.borrow_mut().push(Event::Loading(route.name.clone()));
    }

    fn render(&self, route: &Route, view: View) {
        self.events
            .borrow_mut()
            .push(Event::Rendered(route.name.clone(), view.id()));
    }

    fn not_found(&self, missing: NotFound) {
        self.events.borrow_mut().push(Event::NotFound(missing));
    }

    fn load_failed(&self, route: &Route, failure: LoadFailure) {
        self.events
            .borrow_mut()
            .push(Event::Failed(route.name.clone(), failure));
    }
}

#[test]
fn every_path_resolves_to_its_own_route() {
    let table = table();
    for route in table.routes() {
        let resolved = table.resolve(&route.path).unwrap();
        assert_eq!(resolved, route);
    }
}

#[test]
fn every_name_resolves_to_its_own_route() {
    let table = table();
    for route in table.routes() {
        let resolved = table.resolve_by_name(&route.name).unwrap();
        assert_eq!(resolved, route);
    }
}

#[test]
fn unknown_paths_are_not_found() {
    let table = table();
    assert_eq!(
        table.resolve("/nonexistent"),
        Err(NotFound::Path("/nonexistent".into()))
    );
    assert!(table.resolve("/sensor").is_err());
    assert!(table.resolve("/Sensor/").is_err());
    assert_eq!(
        table.resolve_by_name("sensor"),
        Err(NotFound::Name("sensor".into()))
    );
}

#[test]
fn names_and_paths_are_pairwise_distinct() {
    let table = table();
    let paths: Vec<_> = table.routes().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, PATHS);

    let names: HashSet<_> = table.routes().map(|r| r.name.as_str()).collect();
    assert_eq!(names.len(), PATHS.len());
    let unique_paths: HashSet<_> = paths.iter().collect();
    assert_eq!(unique_paths.len(), PATHS.len());
}

#[test]
fn load_strategies_match_the_dashboard() {
    let table = table();
    let deferred: Vec<_> = table
        .routes()
        .filter(|r| r.load == LoadStrategy::Deferred)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(deferred, ["Sensor", "Settings", "Webcam"]);
}

#[test]
fn dummy_is_an_alias_of_home() {
    let table = table();
    assert_eq!(table.resolve("/dummy").unwrap().view, ViewId::Home);
    assert_eq!(table.resolve("/").unwrap().view, ViewId::Home);
    assert_eq!(table.resolve_by_name("dummy").unwrap().path, "/dummy");
}

#[test]
fn malformed_tables_are_rejected() {
    let duplicate_path = RouteTable::new(
        vec![
            Route::eager("/", "home", ViewId::Home),
            Route::eager("/", "index", ViewId::Home),
        ],
        BasePath::default(),
    );
    assert_eq!(
        duplicate_path.unwrap_err(),
        RouteTableError::DuplicatePath("/".into())
    );

    let duplicate_name = RouteTable::new(
        vec![
            Route::deferred("/Sensor", "Sensor", ViewId::Sensor),
            Route::deferred("/Sensors", "Sensor", ViewId::Sensor),
        ],
        BasePath::default(),
    );
    assert_eq!(
        duplicate_name.unwrap_err(),
        RouteTableError::DuplicateName("Sensor".into())
    );

    let eager_webcam = RouteTable::new(
        vec![Route::eager("/Webcam", "Webcam", ViewId::Webcam)],
        BasePath::default(),
    );
    assert!(matches!(
        eager_webcam,
        Err(RouteTableError::EagerNotResident { view: ViewId::Webcam, .. })
    ));
}

#[test]
fn locations_are_resolved_under_the_base_path() {
    let table = RouteTable::fermentation(BasePath::new("/fermentation/")).unwrap();

    assert_eq!(table.resolve_location("/fermentation").unwrap().name, "home");
    assert_eq!(table.resolve_location("/fermentation/").unwrap().name, "home");
    assert_eq!(
        table
            .resolve_location("/fermentation/Sensor?range=24h#chart")
            .unwrap()
            .name,
        "Sensor"
    );
    assert!(table.resolve_location("/Sensor").is_err());
    assert!(table.resolve_location("/fermentationSensor").is_err());

    let sensor = table.resolve_by_name("Sensor").unwrap();
    assert_eq!(table.href(sensor), "/fermentation/Sensor");
    let home = table.resolve_by_name("home").unwrap();
    assert_eq!(table.href(home), "/fermentation/");
}

#[test]
fn eager_views_load_without_fetching() {
    let loader = InstantLoader::default();
    let cache = ViewCache::new(loader.clone());

    let load = cache.load(&route("/"));
    assert!(load.is_ready());
    assert_eq!(load.now_or_never(), Some(Ok(View::Home)));

    let alias = cache.load(&route("/dummy")).now_or_never();
    assert_eq!(alias, Some(Ok(View::Home)));
    assert_eq!(loader.fetches.get(), 0);
}

#[test]
#[should_panic(expected = "Load polled after completion")]
fn ready_load_cannot_be_polled_twice() {
    let cache = ViewCache::new(InstantLoader::default());
    let mut load = cache.load(&route("/"));

    assert_eq!((&mut load).now_or_never(), Some(Ok(View::Home)));
    let _ = (&mut load).now_or_never();
}

#[tokio::test]
async fn deferred_views_are_fetched_once_across_visits() {
    let loader = InstantLoader::default();
    let cache = ViewCache::new(loader.clone());
    let sensor = route("/Sensor");

    let first = cache.load(&sensor);
    assert!(!first.is_ready());
    assert_eq!(first.await.unwrap().id(), ViewId::Sensor);

    let second = cache.load(&sensor);
    assert!(second.is_ready());
    assert_eq!(second.await.unwrap().id(), ViewId::Sensor);

    assert_eq!(loader.fetches.get(), 1);
    assert!(cache.is_cached(ViewId::Sensor));
    assert!(!cache.is_cached(ViewId::Webcam));
}

#[tokio::test]
async fn concurrent_loads_share_one_fetch() {
    let loader = GatedLoader::default();
    let cache = ViewCache::new(loader.clone());
    let settings = route("/Settings");

    let first = cache.load(&settings);
    let second = cache.load(&settings);
    assert_eq!(loader.fetches.get(), 1);

    loader.release(ViewId::Settings, Ok(bundle(ViewId::Settings)));
    let (first, second) = futures::join!(first, second);
    assert_eq!(first, second);
    assert_eq!(first.unwrap().id(), ViewId::Settings);
    assert_eq!(loader.fetches.get(), 1);
}

#[tokio::test]
async fn failed_fetches_are_surfaced_and_retried() {
    let loader = GatedLoader::default();
    let cache = ViewCache::new(loader.clone());
    let webcam = route("/Webcam");

    let attempt = cache.load(&webcam);
    let failure = LoadFailure::new(ViewId::Webcam, "connection reset");
    loader.release(ViewId::Webcam, Err(failure.clone()));
    assert_eq!(attempt.await, Err(failure));
    assert!(!cache.is_cached(ViewId::Webcam));

    let retry = cache.load(&webcam);
    assert_eq!(loader.fetches.get(), 2);
    loader.release(ViewId::Webcam, Ok(bundle(ViewId::Webcam)));
    assert_eq!(retry.await.unwrap().id(), ViewId::Webcam);
    assert!(cache.is_cached(ViewId::Webcam));
}

#[tokio::test]
async fn navigation_renders_resolved_views() {
    let navigator = Navigator::new(table(), InstantLoader::default());
    let host = RecordingHost::default();

    assert_eq!(
        navigator.navigate("/", &host).await,
        NavigationOutcome::Rendered(ViewId::Home)
    );
    assert_eq!(
        navigator.navigate("/Sensor", &host).await,
        NavigationOutcome::Rendered(ViewId::Sensor)
    );

    assert_eq!(
        host.events(),
        vec![
            Event::Rendered("home".into(), ViewId::Home),
            Event::Loading("Sensor".into()),
            Event::Rendered("Sensor".into(), ViewId::Sensor),
        ]
    );
}

#[tokio::test]
async fn revisiting_a_loaded_route_skips_the_loading_state() {
    let navigator = Navigator::new(table(), InstantLoader::default());
    let host = RecordingHost::default();

    navigator.navigate("/Settings", &host).await;
    navigator.navigate("/", &host).await;
    navigator.navigate("/Settings", &host).await;

    let loading = host
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Loading(_)))
        .count();
    assert_eq!(loading, 1);
}

#[tokio::test]
async fn unknown_locations_reach_the_host_as_not_found() {
    let navigator = Navigator::new(table(), InstantLoader::default());
    let host = RecordingHost::default();

    let outcome = navigator.navigate("/nonexistent", &host).await;
    assert_eq!(
        outcome,
        NavigationOutcome::Failed(NavigationError::NotFound(NotFound::Path(
            "/nonexistent".into()
        )))
    );
    assert_eq!(
        host.events(),
        vec![Event::NotFound(NotFound::Path("/nonexistent".into()))]
    );
}

#[tokio::test]
async fn stale_deferred_view_is_not_rendered() {
    let loader = GatedLoader::default();
    let navigator = Navigator::new(table(), loader.clone());
    let host = RecordingHost::default();

    let mut to_sensor = Box::pin(navigator.navigate("/Sensor", &host));
    assert!(futures::poll!(to_sensor.as_mut()).is_pending());

    assert_eq!(
        navigator.navigate("/", &host).await,
        NavigationOutcome::Rendered(ViewId::Home)
    );

    loader.release(ViewId::Sensor, Ok(bundle(ViewId::Sensor)));
    assert_eq!(to_sensor.await, NavigationOutcome::Superseded);

    assert_eq!(
        host.events(),
        vec![
            Event::Loading("Sensor".into()),
            Event::Rendered("home".into(), ViewId::Home),
        ]
    );
    // the fetch itself still completed and is reused on the next visit
    assert!(navigator.cache().is_cached(ViewId::Sensor));
}

#[tokio::test]
async fn stale_load_failure_is_not_reported() {
    let loader = GatedLoader::default();
    let navigator = Navigator::new(table(), loader.clone());
    let host = RecordingHost::default();

    let mut to_webcam = Box::pin(navigator.navigate("/Webcam", &host));
    assert!(futures::poll!(to_webcam.as_mut()).is_pending());

    let mut to_settings = Box::pin(navigator.navigate("/Settings", &host));
    assert!(futures::poll!(to_settings.as_mut()).is_pending());

    loader.release(
        ViewId::Webcam,
        Err(LoadFailure::new(ViewId::Webcam, "timed out")),
    );
    assert_eq!(to_webcam.await, NavigationOutcome::Superseded);

    loader.release(ViewId::Settings, Ok(bundle(ViewId::Settings)));
    assert_eq!(
        to_settings.await,
        NavigationOutcome::Rendered(ViewId::Settings)
    );

    assert_eq!(
        host.events(),
        vec![
            Event::Loading("Webcam".into()),
            Event::Loading("Settings".into()),
            Event::Rendered("Settings".into(), ViewId::Settings),
        ]
    );
}

#[tokio::test]
async fn current_load_failure_is_reported() {
    let loader = GatedLoader::default();
    let navigator = Navigator::new(table(), loader.clone());
    let host = RecordingHost::default();

    let mut to_webcam = Box::pin(navigator.navigate("/Webcam", &host));
    assert!(futures::poll!(to_webcam.as_mut()).is_pending());

    let failure = LoadFailure::new(ViewId::Webcam, "network unreachable");
    loader.release(ViewId::Webcam, Err(failure.clone()));
    assert_eq!(
        to_webcam.await,
        NavigationOutcome::Failed(NavigationError::Load(failure.clone()))
    );
    assert_eq!(
        host.events().last(),
        Some(&Event::Failed("Webcam".into(), failure))
    );
}
