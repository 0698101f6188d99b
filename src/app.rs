use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use strum::IntoEnumIterator;

use crate::{
    application::{ChartProjection, DashboardState, LoadStatus, PollSnapshotsUseCase},
    config::DashboardConfig,
    domain::{
        chart::{DeviceClass, PointerInput, Viewport},
        gex::{Currency, DerivedMetrics, ReferenceLevels, StrikeRecord},
        logging::{LogComponent, LogEntry, Logger, get_logger, get_time_provider},
    },
    global_signals,
    infrastructure::{ConsoleLogger, GexHttpClient},
};

global_signals! {
    current_currency => currency: Currency,
    chart_projection => projection: Option<ChartProjection>,
    debug_logs => logs: Vec<String>,
    debug_logs_paused => logs_paused: bool,
}

const CHART_WIDTH: f64 = 800.0;
const AXIS_WIDTH: f64 = 80.0;
const MAX_LOG_LINES: usize = 100;

type Dashboard = PollSnapshotsUseCase<GexHttpClient>;

/// Bridge logger: browser console plus the in-page debug console
pub struct LeptosLogger {
    console: ConsoleLogger,
}

impl LeptosLogger {
    pub fn new(console: ConsoleLogger) -> Self {
        Self { console }
    }
}

impl Logger for LeptosLogger {
    fn log(&self, entry: LogEntry) {
        if !self.console.accepts(entry.level) {
            return;
        }
        let formatted = entry.format_with(get_time_provider());
        self.console.log(entry);

        if debug_logs_paused().get_untracked() {
            return;
        }
        debug_logs().update(|lines| {
            lines.push(formatted);
            if lines.len() > MAX_LOG_LINES {
                let excess = lines.len() - MAX_LOG_LINES;
                lines.drain(..excess);
            }
        });
    }
}

/// Device class of the current browser window
fn detect_device_class(config: &DashboardConfig) -> DeviceClass {
    let window = gloo::utils::window();
    let touch_points = window.navigator().max_touch_points();
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::INFINITY);
    DeviceClass::classify(touch_points, width, config.touch_max_width_px)
}

/// Root component of the GEX dashboard
#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let device_class = detect_device_class(&config);
    let state = Rc::new(RefCell::new(DashboardState::new(&config, device_class)));
    chart_projection().set(Some(state.borrow().projection()));

    let repository = Rc::new(GexHttpClient::new(config.api_base_url.clone()));
    let on_change: Rc<dyn Fn(ChartProjection)> = Rc::new(|projection| chart_projection().set(Some(projection)));
    let use_case = PollSnapshotsUseCase::new(repository, state, on_change);

    let interval = use_case.start(config.poll_interval_ms);
    on_cleanup(move || drop(interval));

    let dashboard = store_value(use_case);

    let resize_config = config.clone();
    let resize = window_event_listener(ev::resize, move |_| {
        let device_class = detect_device_class(&resize_config);
        dashboard.with_value(|uc| uc.reclassify_surface(&resize_config, device_class));
    });
    on_cleanup(move || resize.remove());

    get_logger().info(
        LogComponent::Presentation("App"),
        &format!("dashboard mounted on a {} surface, polling {}", device_class, config.api_base_url),
    );

    view! {
        <div class="gex-app">
            <Header dashboard=dashboard />
            <StatusLine />
            <GexChart dashboard=dashboard height=config.chart_height_px />
            <MetricsPanel />
            <DebugConsole />
        </div>
    }
}

#[component]
fn Header(dashboard: StoredValue<Dashboard>) -> impl IntoView {
    let on_currency = move |ev| {
        let value = event_target_value(&ev);
        match value.parse::<Currency>() {
            Ok(currency) => {
                current_currency().set(currency);
                dashboard.with_value(|uc| uc.select_currency(currency));
            }
            Err(_) => get_logger().warn(
                LogComponent::Presentation("Header"),
                &format!("unknown currency `{value}`"),
            ),
        }
    };

    view! {
        <div class="header">
            <h1>"Gamma Exposure"</h1>
            <select on:change=on_currency>
                {Currency::iter()
                    .map(|c| {
                        view! {
                            <option value={c.code().to_string()} selected=move || current_currency().get() == c>
                                {c.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <button class="refresh-btn" on:click=move |_| dashboard.with_value(|uc| uc.refresh())>
                "Refresh"
            </button>
        </div>
    }
}

#[component]
fn StatusLine() -> impl IntoView {
    let status = move || {
        chart_projection().with(|p| match p {
            None => "Loading...".to_string(),
            Some(p) => match (p.status, &p.error) {
                (LoadStatus::Error, Some(error)) => format!("Error: {error}"),
                (LoadStatus::Loading, _) => format!("Loading {}...", p.currency),
                _ if p.no_data => format!("No data for {}, showing last snapshot", p.currency),
                _ => format!("{} strikes, expiry {}", p.records.len(), p.expiration_date.as_deref().unwrap_or("N/A")),
            },
        })
    };

    view! { <div class="status">{status}</div> }
}

/// Strike axis runs vertically; bars extend right for calls and left for puts.
#[component]
fn GexChart(dashboard: StoredValue<Dashboard>, height: f64) -> impl IntoView {
    let send = move |input: PointerInput| {
        dashboard.with_value(|uc| uc.handle_input(input));
    };

    let on_wheel = move |ev: web_sys::WheelEvent| {
        ev.prevent_default();
        send(PointerInput::Wheel { delta_y: ev.delta_y() });
    };
    let on_mouse_down = move |ev: web_sys::MouseEvent| {
        send(PointerInput::MouseDown { coordinate: ev.client_y() as f64 });
    };
    let on_mouse_move = move |ev: web_sys::MouseEvent| {
        send(PointerInput::Move { coordinate: ev.client_y() as f64, surface_height_px: height });
    };
    let on_touch_start = move |ev: web_sys::TouchEvent| {
        let touches = ev.touches();
        if let Some(touch) = touches.get(0) {
            send(PointerInput::TouchStart { coordinate: touch.client_y() as f64, touches: touches.length() });
        }
    };
    let on_touch_move = move |ev: web_sys::TouchEvent| {
        if let Some(touch) = ev.touches().get(0) {
            ev.prevent_default();
            send(PointerInput::Move { coordinate: touch.client_y() as f64, surface_height_px: height });
        }
    };

    let cursor = move || {
        let dragging = chart_projection().with(|p| p.as_ref().is_some_and(|p| p.is_dragging));
        if dragging { "cursor: grabbing" } else { "cursor: grab" }
    };

    view! {
        <div class="chart-container">
            <svg
                width=CHART_WIDTH
                height=height
                viewBox={format!("0 0 {CHART_WIDTH} {height}")}
                style=cursor
                on:wheel=on_wheel
                on:mousedown=on_mouse_down
                on:mousemove=on_mouse_move
                on:mouseup=move |_| send(PointerInput::End)
                on:mouseleave=move |_| send(PointerInput::Leave)
                on:touchstart=on_touch_start
                on:touchmove=on_touch_move
                on:touchend=move |_| send(PointerInput::End)
                on:touchcancel=move |_| send(PointerInput::Leave)
            >
                {move || {
                    chart_projection().with(|p| p.as_ref().map(|p| chart_layers(p, height)))
                }}
            </svg>
        </div>
    }
}

fn chart_layers(projection: &ChartProjection, height: f64) -> View {
    let viewport = Viewport {
        domain_min: projection.domain.0,
        domain_max: projection.domain.1,
        ticks: projection.ticks.clone(),
    };

    let ticks = viewport
        .ticks
        .iter()
        .map(|&tick| {
            let y = viewport.price_to_y(tick, height);
            view! {
                <g class="tick">
                    <line x1=AXIS_WIDTH x2=CHART_WIDTH y1=y y2=y stroke="#334155" stroke-width="0.5" />
                    <text x={AXIS_WIDTH - 6.0} y={y + 4.0} fill="#94a3b8" font-size="11" text-anchor="end">
                        {format!("{tick:.0}")}
                    </text>
                </g>
            }
        })
        .collect_view();

    view! {
        <g>
            {ticks}
            {bars(&projection.records, &viewport, height)}
            {reference_lines(&projection.reference_levels, &viewport, height)}
        </g>
    }
    .into_view()
}

fn bars(records: &[StrikeRecord], viewport: &Viewport, height: f64) -> View {
    let max_abs = records
        .iter()
        .flat_map(|r| [r.call_gex.abs(), r.put_gex.abs()])
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max_abs <= 0.0 {
        return ().into_view();
    }

    let zero_x = AXIS_WIDTH + (CHART_WIDTH - AXIS_WIDTH) / 2.0;
    let half_width = (CHART_WIDTH - AXIS_WIDTH) / 2.0 - 10.0;
    let thickness = bar_thickness(records, viewport, height);

    records
        .iter()
        .filter(|r| viewport.contains(r.strike))
        .map(|r| {
            let y = viewport.price_to_y(r.strike, height) - thickness / 2.0;
            let call_w = (r.call_gex.max(0.0) / max_abs) * half_width;
            let put_w = (r.put_gex.min(0.0).abs() / max_abs) * half_width;
            view! {
                <g class="strike">
                    <rect x=zero_x y=y width=call_w height=thickness fill="#4ade80" />
                    <rect x={zero_x - put_w} y=y width=put_w height=thickness fill="#f87171" />
                </g>
            }
        })
        .collect_view()
}

/// Bar height from the tightest visible strike spacing
fn bar_thickness(records: &[StrikeRecord], viewport: &Viewport, height: f64) -> f64 {
    let gap = records
        .windows(2)
        .map(|w| (w[1].strike - w[0].strike).abs())
        .filter(|g| *g > 0.0)
        .fold(f64::INFINITY, f64::min);
    if !gap.is_finite() || viewport.range() <= 0.0 {
        return 4.0;
    }
    (gap / viewport.range() * height * 0.8).clamp(1.0, 24.0)
}

fn reference_lines(levels: &ReferenceLevels, viewport: &Viewport, height: f64) -> View {
    [
        (levels.spot_price, "Spot", "#facc15", "none"),
        (levels.zero_gamma, "Zero Gamma", "#a78bfa", "2 4"),
        (levels.call_wall, "Call Wall", "#22c55e", "5 5"),
        (levels.put_wall, "Put Wall", "#ef4444", "5 5"),
    ]
    .into_iter()
    .filter_map(|(level, name, color, dash)| {
        let price = level.filter(|p| viewport.contains(*p))?;
        let y = viewport.price_to_y(price, height);
        Some(view! {
            <g class="reference-line">
                <line x1=AXIS_WIDTH x2=CHART_WIDTH y1=y y2=y stroke=color stroke-width="2" stroke-dasharray=dash />
                <text x={CHART_WIDTH - 4.0} y={y - 4.0} fill=color font-size="11" text-anchor="end">
                    {format!("{name} {price:.0}")}
                </text>
            </g>
        })
    })
    .collect_view()
}

#[component]
fn MetricsPanel() -> impl IntoView {
    let rows = move || {
        chart_projection().with(|p| {
            let Some(p) = p else { return Vec::new() };
            let Some(m) = p.derived_metrics.as_ref() else { return Vec::new() };
            metric_rows(m, p)
        })
    };

    view! {
        <div class="metrics-panel">
            <For
                each=rows
                key=|(label, value)| format!("{label}={value}")
                children=move |(label, value)| {
                    view! {
                        <div class="metric">
                            <span class="metric-label">{label}</span>
                            <span class="metric-value">{value}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}

fn metric_rows(m: &DerivedMetrics, p: &ChartProjection) -> Vec<(&'static str, String)> {
    let optional = |v: Option<f64>| v.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"));
    vec![
        ("Spot", m.spot_label.clone()),
        ("Zero Gamma", m.zero_gamma_label.clone()),
        ("Call Wall", m.call_wall_label.clone()),
        ("Put Wall", m.put_wall_label.clone()),
        ("Net GEX", format!("{:.2}", m.net_gex)),
        ("Call GEX", format!("{:.2}", m.total_call_gex)),
        ("Put GEX", format!("{:.2}", m.total_put_gex)),
        ("Put/Call OI", optional(m.put_call_oi_ratio)),
        ("Flip Strike", optional(m.flip_strike)),
        ("Expiration", p.expiration_date.clone().unwrap_or_else(|| "N/A".to_string())),
        ("Updated", p.last_update_label.clone().unwrap_or_else(|| "N/A".to_string())),
        ("View", format!("{} / {}", p.viewport_mode, p.device_class)),
    ]
}

/// In-page view of the domain log stream
#[component]
fn DebugConsole() -> impl IntoView {
    let logs = debug_logs();
    let paused = debug_logs_paused();

    view! {
        <div class="debug-console">
            <div class="debug-header">
                <span>"Log"</span>
                <button class="debug-btn" on:click=move |_| paused.update(|p| *p = !*p)>
                    {move || if paused.get() { "Resume" } else { "Pause" }}
                </button>
                <button class="debug-btn" on:click=move |_| logs.set(Vec::new())>
                    "Clear"
                </button>
            </div>
            <div class="debug-log">
                <For
                    each=move || logs.get().into_iter().enumerate()
                    key=|(i, line)| format!("{i}:{line}")
                    children=move |(_, line)| view! { <div class="log-line">{line}</div> }
                />
            </div>
        </div>
    }
}
