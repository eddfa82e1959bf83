use leptos::prelude::*;
use strum::IntoEnumIterator;

use crate::components::plane::PlaneCanvas;
use crate::graph::maximal::DEFAULT_MIN_COMMON_TAGS;
use crate::graph::{NarrativeRecord, PlaneConfig, Strategy, maximal_clusters, parse_narratives};

/// Dataset shown until one is loaded.
const SAMPLE_NARRATIVES: &str = include_str!("../../assets/narratives.json");

/// Tag clusters shared across the whole dataset, densest first.
#[component]
fn ClusterList(narratives: Vec<NarrativeRecord>) -> impl IntoView {
	let clusters = maximal_clusters(&narratives, DEFAULT_MIN_COMMON_TAGS);
	let names = move |members: &[usize]| {
		members
			.iter()
			.map(|&i| narratives[i].display_name().to_string())
			.collect::<Vec<_>>()
			.join(", ")
	};
	let items = clusters
		.iter()
		.map(|c| {
			let tags = c.common_tags.keys().cloned().collect::<Vec<_>>().join(", ");
			view! {
				<li>
					<strong>{c.id.clone()}</strong>
					" (density " {c.density.to_string()} ")"
					<br />
					{names(c.narratives.as_slice())}
					<br />
					<em>{tags}</em>
				</li>
			}
		})
		.collect_view();

	view! {
		<div class="cluster-list">
			<h2>"Shared tag clusters"</h2>
			<ul>{items}</ul>
		</div>
	}
}

/// One checkbox per narrative, toggling whether it is on the plane.
#[component]
fn NarrativeToggles(
	narratives: Vec<NarrativeRecord>,
	visibility: ReadSignal<Vec<bool>>,
	set_visibility: WriteSignal<Vec<bool>>,
) -> impl IntoView {
	let items = narratives
		.iter()
		.enumerate()
		.map(|(i, record)| {
			let name = record.display_name().to_string();
			view! {
				<li>
					<label>
						<input
							type="checkbox"
							prop:checked=move || visibility.get().get(i).copied().unwrap_or(true)
							on:change=move |ev| {
								let shown = event_target_checked(&ev);
								set_visibility.update(|flags| {
									if let Some(flag) = flags.get_mut(i) {
										*flag = shown;
									}
								});
							}
						/>
						" "
						{name}
					</label>
				</li>
			}
		})
		.collect_view();

	view! {
		<div class="narrative-toggles">
			<h2>"Narratives"</h2>
			<ul>{items}</ul>
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = PlaneConfig::default();
	let (strategy, set_strategy) = signal(config.strategy);
	let (threshold, set_threshold) = signal(config.threshold);
	let (lines_visible, set_lines_visible) = signal(true);

	let options = Strategy::iter()
		.map(|s| {
			let value: &'static str = s.into();
			view! {
				<option value=value selected=move || strategy.get() == s>
					{s.label()}
				</option>
			}
		})
		.collect_view();

	let slider_config = config.clone();
	let on_threshold = move |ev: leptos::ev::Event| {
		if let Ok(t) = event_target_value(&ev).parse::<f64>() {
			set_threshold.set(slider_config.clamp_threshold(t));
		}
	};

	let plane_config = config.clone();
	let plane = parse_narratives(SAMPLE_NARRATIVES).map(move |narratives| {
		let (visibility, set_visibility) = signal(vec![true; narratives.len()]);
		let (listed, toggled) = (narratives.clone(), narratives.clone());
		let data = Signal::derive(move || narratives.clone());
		view! {
			<PlaneCanvas
				narratives=data
				strategy=strategy
				threshold=threshold
				lines_visible=lines_visible
				visibility=visibility
				config=plane_config
				fullscreen=true
			/>
			<div class="plane-sidebar">
				<NarrativeToggles
					narratives=toggled
					visibility=visibility
					set_visibility=set_visibility
				/>
				<ClusterList narratives=listed />
			</div>
		}
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-plane">
				{plane}
				<div class="plane-overlay">
					<h1>"Narrative Plane"</h1>
					<p class="subtitle">
						"Drag narratives to rearrange. Hover a line for details. Scroll to zoom."
					</p>
					<div class="view-toggle">
						<select
							id="connection-strategy"
							on:change=move |ev| {
								if let Ok(s) = event_target_value(&ev).parse::<Strategy>() {
									set_strategy.set(s);
								}
							}
						>
							{options}
						</select>
						<button on:click=move |_| set_lines_visible.update(|v| *v = !*v)>
							{move || if lines_visible.get() { "Hide Lines" } else { "Show Lines" }}
						</button>
					</div>
					<div
						class="hindex-slider"
						style:display=move || {
							if strategy.get().uses_threshold() { "inline-block" } else { "none" }
						}
					>
						<label for="hindex-threshold">"Min score "</label>
						<input
							id="hindex-threshold"
							type="range"
							min=config.threshold_min.to_string()
							max=config.threshold_max.to_string()
							step=config.threshold_step.to_string()
							prop:value=move || threshold.get().to_string()
							on:input=on_threshold
						/>
						<span>{move || threshold.get().to_string()}</span>
					</div>
				</div>
			</div>
		</ErrorBoundary>
	}
}
