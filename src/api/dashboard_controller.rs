use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::core::{AircraftSummary, TimeWindow, parse_instant};
use crate::error::{GanttError, GanttResult, UpstreamError};
use crate::interaction::{
    DateSelection, PresetKind, RangeSelection, SelectionOutcome, ensure_window, today_in,
};
use crate::render::{LayoutConfig, LayoutOutcome};
use crate::schedule::{
    ColorAssignment, GroundScheduleResponse, ScheduleModel, TripScheduleResponse,
    adapt_ground_response_with, adapt_trip_response_with,
};

use super::{ChartView, DashboardConfig, FetchOutcome, FetchTicket, ScheduleSource};

pub const AIRCRAFT_LOAD_FAILED: &str =
    "Failed to load planes. Please make sure the backend is running.";
pub const NO_AIRCRAFT_SELECTED: &str = "Please select at least one plane";
pub const NO_VALID_RANGE: &str = "Please select a valid time range";
pub const CHART_LOAD_FAILED: &str = "Failed to load chart data. Please check your selection.";

#[derive(Debug)]
struct DashboardState {
    aircraft: Vec<AircraftSummary>,
    selected: Vec<String>,
    range: RangeSelection,
    view: ChartView,
    loading: bool,
    error: Option<String>,
    trips: Option<ScheduleModel>,
    ground: Option<ScheduleModel>,
    generation: u64,
    /// Generation of the most recently issued fetch.
    last_fetch: u64,
}

impl DashboardState {
    fn invalidate(&mut self, reason: &'static str) {
        self.generation += 1;
        trace!(generation = self.generation, reason, "dashboard state invalidated");
    }

    fn fail_precondition(&mut self, message: &'static str) -> GanttError {
        self.loading = false;
        self.error = Some(message.to_owned());
        GanttError::Precondition(message)
    }

    fn model_slot(&mut self, view: ChartView) -> &mut Option<ScheduleModel> {
        match view {
            ChartView::Trips => &mut self.trips,
            ChartView::GroundTime => &mut self.ground,
        }
    }
}

/// Session state of the schedule dashboard.
///
/// Every method takes `&self`; the state sits behind a mutex that is never
/// held across an await. Any change to the selection, window or view, and
/// every new fetch, bumps a generation counter so that only the latest
/// request can apply its result.
#[derive(Debug)]
pub struct DashboardController {
    layout: LayoutConfig,
    colors: ColorAssignment,
    state: Mutex<DashboardState>,
}

impl DashboardController {
    pub fn new(config: DashboardConfig) -> GanttResult<Self> {
        let config = config.validate()?;
        let range = RangeSelection::from_window(
            config.default_window,
            config.range,
            config.layout.timezone,
        )?;
        Ok(Self {
            layout: config.layout,
            colors: ColorAssignment::default(),
            state: Mutex::new(DashboardState {
                aircraft: Vec::new(),
                selected: Vec::new(),
                range,
                view: config.default_view,
                loading: false,
                error: None,
                trips: None,
                ground: None,
                generation: 0,
                last_fetch: 0,
            }),
        })
    }

    #[must_use]
    pub fn with_color_assignment(mut self, colors: ColorAssignment) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn aircraft(&self) -> Vec<AircraftSummary> {
        self.state.lock().aircraft.clone()
    }

    #[must_use]
    pub fn selected_aircraft(&self) -> Vec<String> {
        self.state.lock().selected.clone()
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.state.lock().range.window()
    }

    #[must_use]
    pub fn range_selection(&self) -> RangeSelection {
        self.state.lock().range.clone()
    }

    #[must_use]
    pub fn view(&self) -> ChartView {
        self.state.lock().view
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// User-visible message of the last failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Model of the current view; `None` before the first fetch or after a failure.
    #[must_use]
    pub fn current_model(&self) -> Option<ScheduleModel> {
        let mut state = self.state.lock();
        let view = state.view;
        state.model_slot(view).clone()
    }

    /// Lays out the current view's model with the configured layout settings.
    pub fn layout(&self) -> GanttResult<Option<LayoutOutcome>> {
        self.layout_with(self.layout)
    }

    pub fn layout_with(&self, config: LayoutConfig) -> GanttResult<Option<LayoutOutcome>> {
        self.current_model()
            .map(|model| model.layout(config))
            .transpose()
    }

    /// Loads the aircraft list and selects every aircraft in it.
    pub async fn load_aircraft<S>(&self, source: &S) -> GanttResult<usize>
    where
        S: ScheduleSource + ?Sized,
    {
        match source.fetch_aircraft_list().await {
            Ok(list) => {
                let mut state = self.state.lock();
                state.selected = list
                    .aircraft
                    .iter()
                    .map(|aircraft| aircraft.aircraft_id.clone())
                    .collect();
                state.aircraft = list.aircraft;
                state.invalidate("aircraft list loaded");
                debug!(count = state.aircraft.len(), "loaded aircraft list");
                Ok(state.aircraft.len())
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status, "aircraft list load failed");
                self.state.lock().error = Some(AIRCRAFT_LOAD_FAILED.to_owned());
                Err(GanttError::Upstream(err))
            }
        }
    }

    pub fn set_selection(&self, aircraft_ids: Vec<String>) {
        let mut state = self.state.lock();
        if state.selected != aircraft_ids {
            state.selected = aircraft_ids;
            state.invalidate("aircraft selection changed");
        }
    }

    /// Commits a new window if it passes the range policy.
    ///
    /// A rejected window leaves the previous one in effect.
    pub fn set_window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> SelectionOutcome {
        let mut state = self.state.lock();
        let range = state.range.policy();
        let timezone = self.layout.timezone;
        let applied = ensure_window(start, end, range)
            .and_then(|window| RangeSelection::from_window(window, range, timezone));
        match applied {
            Ok(selection) => {
                state.range = selection;
                state.invalidate("window changed");
                SelectionOutcome::Applied
            }
            Err(err) => {
                debug!(error = %err, "window change rejected");
                SelectionOutcome::Rejected
            }
        }
    }

    /// Same as [`Self::set_window`] for RFC 3339 strings; unparseable input is an error.
    pub fn set_window_rfc3339(&self, start: &str, end: &str) -> GanttResult<SelectionOutcome> {
        let start = parse_instant(start)?;
        let end = parse_instant(end)?;
        Ok(self.set_window(start, end))
    }

    /// Applies a preset anchored on today's date in the display timezone.
    pub fn apply_preset(&self, kind: PresetKind) -> GanttResult<SelectionOutcome> {
        let today = today_in(self.layout.timezone);
        let mut result = Ok(SelectionOutcome::Rejected);
        let outcome = self.update_range(|range| {
            result = range.apply_preset(kind, today);
            result.as_ref().map_or(SelectionOutcome::Rejected, |outcome| *outcome)
        });
        result.map(|_| outcome)
    }

    /// Applies a picker interaction; the generation moves only when the
    /// committed window actually changes.
    pub fn update_range<F>(&self, change: F) -> SelectionOutcome
    where
        F: FnOnce(&mut RangeSelection) -> SelectionOutcome,
    {
        let mut state = self.state.lock();
        let before = state.range.window();
        let outcome = change(&mut state.range);
        if state.range.window() != before {
            state.invalidate("window changed");
        }
        outcome
    }

    pub fn set_view(&self, view: ChartView) {
        let mut state = self.state.lock();
        if state.view != view {
            state.view = view;
            state.invalidate("view changed");
        }
    }

    /// Starts a fetch for the current selection.
    ///
    /// Fails with a user-visible precondition message when no aircraft is
    /// selected or the date range is incomplete.
    pub fn begin_fetch(&self) -> GanttResult<FetchTicket> {
        let mut state = self.state.lock();
        if state.selected.is_empty() {
            return Err(state.fail_precondition(NO_AIRCRAFT_SELECTED));
        }
        if !matches!(state.range.dates(), DateSelection::Complete { .. }) {
            return Err(state.fail_precondition(NO_VALID_RANGE));
        }

        state.invalidate("fetch started");
        state.last_fetch = state.generation;
        state.loading = true;
        state.error = None;
        let ticket = FetchTicket {
            generation: state.generation,
            view: state.view,
            aircraft_ids: state.selected.clone(),
            window: state.range.window(),
        };
        debug!(
            generation = ticket.generation,
            view = ?ticket.view,
            aircraft = ticket.aircraft_ids.len(),
            "schedule fetch started"
        );
        Ok(ticket)
    }

    pub fn complete_trip_fetch(
        &self,
        ticket: &FetchTicket,
        result: Result<TripScheduleResponse, UpstreamError>,
    ) -> FetchOutcome {
        let model = result
            .map_err(GanttError::from)
            .and_then(|response| adapt_trip_response_with(&response, self.colors));
        self.complete(ticket, ChartView::Trips, model)
    }

    pub fn complete_ground_fetch(
        &self,
        ticket: &FetchTicket,
        result: Result<GroundScheduleResponse, UpstreamError>,
    ) -> FetchOutcome {
        let model = result
            .map_err(GanttError::from)
            .and_then(|response| adapt_ground_response_with(&response, self.colors));
        self.complete(ticket, ChartView::GroundTime, model)
    }

    /// Fetches the current view from `source` and applies the result unless
    /// a newer request superseded it in the meantime.
    pub async fn refresh<S>(&self, source: &S) -> GanttResult<FetchOutcome>
    where
        S: ScheduleSource + ?Sized,
    {
        let ticket = self.begin_fetch()?;
        let outcome = match ticket.view {
            ChartView::Trips => {
                let result = source
                    .fetch_trip_schedule(&ticket.aircraft_ids, ticket.window)
                    .await;
                self.complete_trip_fetch(&ticket, result)
            }
            ChartView::GroundTime => {
                let result = source
                    .fetch_ground_schedule(&ticket.aircraft_ids, ticket.window)
                    .await;
                self.complete_ground_fetch(&ticket, result)
            }
        };
        Ok(outcome)
    }

    fn complete(
        &self,
        ticket: &FetchTicket,
        view: ChartView,
        model: GanttResult<ScheduleModel>,
    ) -> FetchOutcome {
        let mut state = self.state.lock();
        if ticket.generation == state.last_fetch {
            // No newer fetch is in flight.
            state.loading = false;
        }
        if ticket.generation != state.generation || ticket.view != view {
            debug!(
                ticket = ticket.generation,
                current = state.generation,
                "discarding stale schedule result"
            );
            return FetchOutcome::Stale;
        }

        match model {
            Ok(model) => {
                debug!(
                    generation = ticket.generation,
                    rows = model.rows.len(),
                    intervals = model.interval_count(),
                    "schedule applied"
                );
                *state.model_slot(view) = Some(model);
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(generation = ticket.generation, error = %err, "schedule fetch failed");
                *state.model_slot(view) = None;
                state.error = Some(user_message(&err));
                FetchOutcome::Failed
            }
        }
    }
}

fn user_message(err: &GanttError) -> String {
    let message = match err {
        GanttError::Upstream(upstream) => upstream.message.clone(),
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        CHART_LOAD_FAILED.to_owned()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardController, NO_AIRCRAFT_SELECTED, NO_VALID_RANGE};
    use crate::api::{ChartView, DashboardConfig, FetchOutcome};
    use crate::error::UpstreamError;
    use crate::interaction::{PresetKind, SelectionOutcome};
    use crate::schedule::TripScheduleResponse;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn controller() -> DashboardController {
        DashboardController::new(DashboardConfig::default()).expect("controller")
    }

    fn empty_trips(ticket_window: crate::core::TimeWindow) -> TripScheduleResponse {
        TripScheduleResponse {
            title: "Trips".to_owned(),
            start: ticket_window.start(),
            end: ticket_window.end(),
            aircraft: Vec::new(),
        }
    }

    #[test]
    fn fetch_requires_a_selection() {
        let controller = controller();
        let err = controller.begin_fetch().expect_err("must fail");
        assert_eq!(format!("{err}"), NO_AIRCRAFT_SELECTED);
        assert_eq!(controller.error().as_deref(), Some(NO_AIRCRAFT_SELECTED));
    }

    #[test]
    fn fetch_requires_complete_dates() {
        let controller = controller();
        controller.set_selection(vec!["A".to_owned()]);
        let date = NaiveDate::from_ymd_opt(2022, 1, 5).expect("date");
        let outcome = controller.update_range(|range| range.pick_dates(date, None));
        assert_eq!(outcome, SelectionOutcome::Pending);
        let err = controller.begin_fetch().expect_err("must fail");
        assert_eq!(format!("{err}"), NO_VALID_RANGE);
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let controller = controller();
        controller.set_selection(vec!["A".to_owned()]);
        let first = controller.begin_fetch().expect("first");
        let second = controller.begin_fetch().expect("second");

        let window = controller.window();
        assert_eq!(
            controller.complete_trip_fetch(&second, Ok(empty_trips(window))),
            FetchOutcome::Applied
        );
        assert_eq!(
            controller.complete_trip_fetch(&first, Ok(empty_trips(window))),
            FetchOutcome::Stale
        );
        assert!(!controller.is_loading());
    }

    #[test]
    fn failure_clears_model_and_relays_message() {
        let controller = controller();
        controller.set_selection(vec!["A".to_owned()]);
        let ticket = controller.begin_fetch().expect("ticket");
        controller.complete_trip_fetch(&ticket, Ok(empty_trips(controller.window())));
        assert!(controller.current_model().is_some());

        let ticket = controller.begin_fetch().expect("ticket");
        let outcome =
            controller.complete_trip_fetch(&ticket, Err(UpstreamError::from_status(503)));
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(controller.current_model().is_none());
        assert_eq!(controller.error().as_deref(), Some("HTTP error! status: 503"));
    }

    #[test]
    fn view_change_invalidates_pending_fetch() {
        let controller = controller();
        controller.set_selection(vec!["A".to_owned()]);
        let ticket = controller.begin_fetch().expect("ticket");
        controller.set_view(ChartView::GroundTime);
        assert_eq!(
            controller.complete_trip_fetch(&ticket, Ok(empty_trips(controller.window()))),
            FetchOutcome::Stale
        );
    }

    #[test]
    fn rfc3339_window_input_is_parsed_or_reported() {
        let controller = controller();
        let outcome = controller
            .set_window_rfc3339("2022-03-01T00:00:00Z", "2022-03-02T12:00:00+02:00")
            .expect("parse");
        assert_eq!(outcome, SelectionOutcome::Applied);
        assert_eq!(
            controller.window().end(),
            Utc.with_ymd_and_hms(2022, 3, 2, 10, 0, 0).unwrap()
        );
        assert!(controller.set_window_rfc3339("yesterday", "today").is_err());
    }

    #[test]
    fn preset_commits_a_full_day_window() {
        let controller = controller();
        let outcome = controller.apply_preset(PresetKind::Today).expect("preset");
        assert_eq!(outcome, SelectionOutcome::Applied);
        assert_eq!(
            controller.window().duration(),
            Duration::days(1) - Duration::milliseconds(1)
        );
        assert_eq!(controller.range_selection().start_time(), "00:00");
    }

    #[test]
    fn oversized_window_is_rejected_and_previous_kept() {
        let controller = controller();
        let before = controller.window();
        let start = Utc.with_ymd_and_hms(2022, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(
            controller.set_window(start, start + Duration::days(8)),
            SelectionOutcome::Rejected
        );
        assert_eq!(controller.window(), before);
        assert_eq!(
            controller.set_window(start, start + Duration::days(2)),
            SelectionOutcome::Applied
        );
        assert_eq!(controller.window().start(), start);
    }
}
