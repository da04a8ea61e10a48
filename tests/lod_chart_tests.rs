use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use chart_lod::{ChartError, ChartResult};
use chart_lod::api::{LevelSwitch, LodChart, LodChartConfig, SpatialIndex};
use chart_lod::core::{DomainRange, PointBuffer, Viewport};
use chart_lod::extensions::{LodContext, LodEvent, LodObserver};
use chart_lod::interaction::InteractionMode;
use chart_lod::lod::LodConfig;
use chart_lod::render::{NullRenderer, Renderer, SeriesUpload};

const SERIES: &str = "prices";

fn series(n: usize) -> PointBuffer {
    let coords: Vec<f64> = (0..n)
        .flat_map(|i| {
            let x = i as f64;
            [x, (x / 5_000.0).sin() * 100.0 + (i % 13) as f64]
        })
        .collect();
    PointBuffer::new(coords)
}

fn chart_config() -> LodChartConfig {
    LodChartConfig::new(Viewport::new(800, 400), 0.0, 1.0).with_lod_config(
        LodConfig::default()
            .with_target_levels(vec![100_000, 10_000])
            .with_min_points_for_lod(50_000)
            .with_max_points_per_pixel(4.0),
    )
}

fn chart() -> LodChart<NullRenderer> {
    LodChart::new(NullRenderer::default(), chart_config()).expect("chart init")
}

#[derive(Clone)]
struct RecordingObserver {
    id: String,
    events: Rc<RefCell<Vec<LodEvent>>>,
}

impl LodObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &LodEvent, _context: LodContext) {
        self.events.borrow_mut().push(event.clone());
    }
}

fn recorder(id: &str) -> (RecordingObserver, Rc<RefCell<Vec<LodEvent>>>) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let observer = RecordingObserver {
        id: id.to_owned(),
        events: events.clone(),
    };
    (observer, events)
}

#[derive(Default)]
struct RecordingIndex {
    rebuilt: Rc<RefCell<Vec<(String, PointBuffer)>>>,
    removed: Rc<RefCell<Vec<String>>>,
}

impl SpatialIndex for RecordingIndex {
    fn rebuild(&mut self, series_id: &str, points: &PointBuffer) {
        self.rebuilt
            .borrow_mut()
            .push((series_id.to_owned(), points.clone()));
    }

    fn remove(&mut self, series_id: &str) {
        self.removed.borrow_mut().push(series_id.to_owned());
    }
}

/// Accepts uploads but refuses to free buffers.
#[derive(Default)]
struct StuckReleaseRenderer {
    uploads: usize,
}

impl Renderer for StuckReleaseRenderer {
    fn upload(&mut self, _upload: &SeriesUpload<'_>) -> ChartResult<()> {
        self.uploads += 1;
        Ok(())
    }

    fn release(&mut self, series_id: &str) -> ChartResult<()> {
        Err(ChartError::InvalidData(format!("cannot release `{series_id}`")))
    }
}

#[test]
fn loading_uploads_coarsest_level_for_full_view() {
    let mut chart = chart();
    let switches = chart.load_series(SERIES, series(1_000_000)).expect("load");

    assert_eq!(
        switches,
        vec![LevelSwitch {
            series_id: SERIES.to_owned(),
            from: None,
            to: 2,
            point_count: 10_000,
        }]
    );
    assert_eq!(chart.current_level(SERIES), Some(2));
    assert_eq!(chart.full_range(), DomainRange::new(0.0, 999_999.0));
    assert_eq!(chart.visible_range(), chart.full_range());

    let resident = chart.renderer().resident(SERIES).expect("uploaded");
    assert_eq!(resident.level, 2);
    assert_eq!(resident.points.point_count(), 10_000);
}

#[test]
fn zooming_in_switches_to_finer_levels() {
    let mut chart = chart();
    let input = series(1_000_000);
    chart.load_series(SERIES, input.clone()).expect("load");

    let switches = chart.set_visible_range(0.0, 10_000.0).expect("zoom");
    assert_eq!(switches.len(), 1);
    assert_eq!(switches[0].from, Some(2));
    assert_eq!(switches[0].to, 1);
    assert_eq!(chart.current_level(SERIES), Some(1));

    chart.set_visible_range(0.0, 2_000.0).expect("zoom");
    assert_eq!(chart.current_level(SERIES), Some(0));
    let resident = chart.renderer().resident(SERIES).expect("uploaded");
    assert!(resident.points.shares_storage_with(&input));
    assert_eq!(chart.renderer().upload_count, 3);

    chart.reset_visible_range().expect("reset");
    assert_eq!(chart.current_level(SERIES), Some(2));
}

#[test]
fn pan_within_same_level_does_not_reupload() {
    let mut chart = chart();
    chart.load_series(SERIES, series(1_000_000)).expect("load");
    chart.set_visible_range(0.0, 2_000.0).expect("zoom");
    let uploads = chart.renderer().upload_count;

    let switches = chart.pan_by_pixels(10.0).expect("pan");
    assert!(switches.is_empty());
    assert_eq!(chart.renderer().upload_count, uploads);
    let visible = chart.visible_range();
    assert_relative_eq!(visible.min, -25.0, epsilon = 1e-9);
    assert_relative_eq!(visible.max, 1_975.0, epsilon = 1e-9);
}

#[test]
fn pointer_drag_pans_visible_range() {
    let mut chart = chart();
    chart.load_series(SERIES, series(1_000_000)).expect("load");
    chart.set_visible_range(0.0, 10_000.0).expect("zoom");

    assert!(chart.pan_move(300.0).expect("idle move").is_empty());
    assert_eq!(chart.visible_range(), DomainRange::new(0.0, 10_000.0));

    chart.pan_start(400.0);
    assert_eq!(chart.interaction_mode(), InteractionMode::Panning);
    chart.pan_move(200.0).expect("pan move");
    chart.pan_end();
    assert_eq!(chart.interaction_mode(), InteractionMode::Idle);

    let visible = chart.visible_range();
    assert_relative_eq!(visible.min, 2_500.0, epsilon = 1e-9);
    assert_relative_eq!(visible.max, 12_500.0, epsilon = 1e-9);
    assert_eq!(chart.current_level(SERIES), Some(1));
}

#[test]
fn zoom_around_pixel_keeps_anchor_and_refines_level() {
    let mut chart = chart();
    chart.load_series(SERIES, series(1_000_000)).expect("load");

    chart.zoom_around_pixel(100.0, 0.0).expect("zoom");
    let visible = chart.visible_range();
    assert_relative_eq!(visible.min, 0.0, epsilon = 1e-9);
    assert_relative_eq!(visible.max, 9_999.99, epsilon = 1e-6);
    assert_eq!(chart.current_level(SERIES), Some(1));

    assert!(chart.zoom_around_pixel(0.0, 10.0).is_err());
}

#[test]
fn wider_viewport_raises_pixel_budget() {
    let mut chart = chart();
    chart.load_series(SERIES, series(1_000_000)).expect("load");
    assert_eq!(chart.current_level(SERIES), Some(2));

    let switches = chart.resize(Viewport::new(30_000, 400)).expect("resize");
    assert_eq!(switches.len(), 1);
    assert_eq!(chart.current_level(SERIES), Some(1));
    assert_eq!(chart.viewport().width, 30_000);

    assert!(matches!(
        chart.resize(Viewport::new(800, 0)),
        Err(ChartError::InvalidViewport { width: 800, height: 0 })
    ));
    assert_eq!(chart.viewport().width, 30_000);
}

#[test]
fn small_series_stays_at_full_resolution() {
    let mut chart = chart();
    let input = series(1_000);
    chart.load_series("small", input.clone()).expect("load");
    assert_eq!(chart.levels("small").map(|table| table.len()), Some(1));

    chart.set_visible_range(0.0, 1.0).expect("zoom");
    chart.resize(Viewport::new(1, 1)).expect("resize");
    assert_eq!(chart.current_level("small"), Some(0));
    let resident = chart.renderer().resident("small").expect("uploaded");
    assert!(resident.points.shares_storage_with(&input));
    assert_eq!(chart.renderer().upload_count, 1);
}

#[test]
fn removing_series_releases_renderer_buffer() {
    let mut chart = chart();
    chart.load_series(SERIES, series(100_000)).expect("load");
    chart.load_scatter_series("cloud", series(60_000)).expect("load");
    assert_eq!(chart.series_count(), 2);
    assert_eq!(chart.renderer().resident_count(), 2);

    assert!(chart.remove_series(SERIES).expect("remove"));
    assert!(!chart.remove_series(SERIES).expect("second remove"));
    assert_eq!(chart.renderer().release_count, 1);
    assert!(chart.renderer().resident(SERIES).is_none());
    assert!(chart.levels(SERIES).is_none());
    assert_eq!(chart.current_level(SERIES), None);

    chart.clear().expect("clear");
    assert_eq!(chart.series_count(), 0);
    assert!(chart.manager().is_empty());
    assert_eq!(chart.into_renderer().resident_count(), 0);
}

#[test]
fn full_range_grows_to_cover_every_series() {
    let mut chart = chart();
    chart.load_series("a", series(1_000)).expect("load");
    assert_eq!(chart.full_range(), DomainRange::new(0.0, 999.0));

    let shifted: Vec<f64> = (0..2_000)
        .flat_map(|i| [500.0 + i as f64, 1.0])
        .collect();
    chart.load_series("b", PointBuffer::new(shifted)).expect("load");

    assert_eq!(chart.full_range(), DomainRange::new(0.0, 2_499.0));
    assert_eq!(
        chart.series_full_range("b"),
        Some(DomainRange::new(500.0, 2_499.0))
    );
    assert_eq!(chart.series_full_range("a"), Some(DomainRange::new(0.0, 999.0)));
}

#[test]
fn configured_domain_is_kept_without_fitting() {
    let config = chart_config().with_fit_domain_on_load(false);
    let mut chart = LodChart::new(NullRenderer::default(), config).expect("chart init");
    chart.load_series(SERIES, series(1_000)).expect("load");
    assert_eq!(chart.full_range(), DomainRange::new(0.0, 1.0));
}

#[test]
fn observers_see_lifecycle_events_in_order() {
    let mut chart = chart();
    let (observer, events) = recorder("recorder");
    chart.register_observer(Box::new(observer)).expect("register");

    chart.load_series(SERIES, series(1_000_000)).expect("load");
    chart.set_visible_range(0.0, 10_000.0).expect("zoom");
    chart.remove_series(SERIES).expect("remove");

    let events = events.borrow();
    assert_eq!(
        *events,
        vec![
            LodEvent::LevelsGenerated {
                series_id: SERIES.to_owned(),
                levels: 3,
                source_count: 1_000_000,
            },
            LodEvent::LevelChanged {
                series_id: SERIES.to_owned(),
                from: None,
                to: 2,
                point_count: 10_000,
            },
            LodEvent::VisibleRangeChanged {
                range: DomainRange::new(0.0, 10_000.0),
            },
            LodEvent::LevelChanged {
                series_id: SERIES.to_owned(),
                from: Some(2),
                to: 1,
                point_count: 100_000,
            },
            LodEvent::SeriesRemoved {
                series_id: SERIES.to_owned(),
            },
        ]
    );
}

#[test]
fn observer_registration_rejects_duplicates() {
    let mut chart = chart();
    let (first, _) = recorder("dup");
    let (second, _) = recorder("dup");
    let (unnamed, _) = recorder("");

    chart.register_observer(Box::new(first)).expect("register");
    assert!(chart.register_observer(Box::new(second)).is_err());
    assert!(chart.register_observer(Box::new(unnamed)).is_err());
    assert!(chart.has_observer("dup"));
    assert!(chart.unregister_observer("dup"));
    assert!(!chart.unregister_observer("dup"));
}

#[test]
fn spatial_index_receives_original_data() {
    let mut chart = chart();
    let index = RecordingIndex::default();
    let rebuilt = index.rebuilt.clone();
    let removed = index.removed.clone();
    chart.set_spatial_index(Box::new(index));

    let input = series(200_000);
    chart.load_series(SERIES, input.clone()).expect("load");
    assert_ne!(chart.current_level(SERIES), Some(0));

    {
        let rebuilt = rebuilt.borrow();
        assert_eq!(rebuilt.len(), 1);
        assert_eq!(rebuilt[0].0, SERIES);
        assert!(rebuilt[0].1.shares_storage_with(&input));
    }

    chart.remove_series(SERIES).expect("remove");
    assert_eq!(*removed.borrow(), vec![SERIES.to_owned()]);
}

#[test]
fn late_spatial_index_is_fed_loaded_series() {
    let mut chart = chart();
    let input = series(2_000);
    chart.load_series(SERIES, input.clone()).expect("load");

    let index = RecordingIndex::default();
    let rebuilt = index.rebuilt.clone();
    chart.set_spatial_index(Box::new(index));

    let rebuilt = rebuilt.borrow();
    assert_eq!(rebuilt.len(), 1);
    assert!(rebuilt[0].1.shares_storage_with(&input));
}

#[test]
fn invalid_setup_is_rejected() {
    let zero_width = LodChartConfig::new(Viewport::new(0, 400), 0.0, 1.0);
    assert!(matches!(
        LodChart::new(NullRenderer::default(), zero_width),
        Err(ChartError::InvalidViewport { width: 0, height: 400 })
    ));

    let bad_lod = chart_config().with_lod_config(LodConfig::default().with_target_levels(vec![10, 10]));
    assert!(matches!(
        LodChart::new(NullRenderer::default(), bad_lod),
        Err(ChartError::InvalidConfig(_))
    ));

    let mut chart = chart();
    assert!(chart.load_series("", series(10)).is_err());
    assert_eq!(chart.series_count(), 0);
}

#[test]
fn memory_usage_reports_loaded_levels() {
    let mut chart = chart();
    chart.load_series(SERIES, series(200_000)).expect("load");
    let usage = chart.memory_usage();
    assert_eq!(usage.series_count, 1);
    assert_eq!(usage.per_level_counts[SERIES], vec![200_000, 100_000, 10_000]);
}

#[test]
fn failed_release_still_detaches_series() {
    let mut chart =
        LodChart::new(StuckReleaseRenderer::default(), chart_config()).expect("chart init");
    let (observer, events) = recorder("recorder");
    chart.register_observer(Box::new(observer)).expect("register");
    let index = RecordingIndex::default();
    let removed = index.removed.clone();
    chart.set_spatial_index(Box::new(index));

    chart.load_series("a", series(1_000)).expect("load");
    chart.load_series("b", series(1_000)).expect("load");
    assert_eq!(chart.renderer().uploads, 2);

    let err = chart.remove_series("a").expect_err("release fails");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(chart.series_count(), 1);
    assert!(chart.levels("a").is_none());
    assert_eq!(*removed.borrow(), vec!["a".to_owned()]);
    assert_eq!(
        events.borrow().last(),
        Some(&LodEvent::SeriesRemoved {
            series_id: "a".to_owned(),
        })
    );

    assert!(chart.clear().is_err());
    assert_eq!(chart.series_count(), 0);
    assert!(chart.manager().is_empty());
    assert_eq!(*removed.borrow(), vec!["a".to_owned(), "b".to_owned()]);
}
