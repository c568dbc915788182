use globetrot_tour::TourSnapshot;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub snapshot: TourSnapshot,
    pub on_toggle_pause: Callback<()>,
    pub on_toggle_layer: Callback<()>,
}

/// Pause/resume, layer switch and the overlays that report tour progress.
#[function_component(TourControls)]
pub fn tour_controls(props: &Props) -> Html {
    let snap = &props.snapshot;
    let on_pause = {
        let cb = props.on_toggle_pause.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_layer = {
        let cb = props.on_toggle_layer.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let progress_style = format!("width: {:.1}%;", snap.progress_percent());

    html! {
        <>
            if snap.started {
                <div class="tour-progress" role="progressbar">
                    <div class="tour-progress__fill" style={progress_style}></div>
                </div>
            }
            <div class="tour-controls">
                <button class="tour-controls__pause" onclick={on_pause}>
                    { snap.pause_label() }
                </button>
                <button class="tour-controls__layer" onclick={on_layer}>
                    { snap.layer.toggle_label() }
                </button>
            </div>
            if snap.exploring_hint_visible() {
                <div class="tour-hint">
                    <span>{ "Exploring. Tour resumes after 15 s idle" }</span>
                </div>
            }
            if let Some(counter) = snap.counter_label() {
                <div class="tour-counter">{ counter }</div>
            }
        </>
    }
}
