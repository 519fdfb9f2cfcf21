//! Host integration tests: bring-up against a simulated module.

use bluefruit_hid::command::{GapIntervals, ECHO_OFF, HID_ENABLE, RESET};
use bluefruit_hid::sim::{RecordingDelay, SimError, SimulatedModule};
use bluefruit_hid::{BringUpOptions, BringUpState, Error, Sequencer, Step};

fn run(module: SimulatedModule, options: BringUpOptions) -> (Result<(), Error<SimError>>, SimulatedModule) {
    let mut seq = Sequencer::new(module, RecordingDelay::new(), options).expect("valid options");
    let result = seq.initialize();
    (result, seq.into_inner())
}

fn commands(module: &SimulatedModule) -> Vec<String> {
    module.commands().map(String::from).collect()
}

fn all_presets() -> [BringUpOptions; 3] {
    [
        BringUpOptions::controller_input(),
        BringUpOptions::controller_paced(),
        BringUpOptions::controller_tuned(),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// Success path
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn every_preset_completes_when_module_accepts_everything() {
    for options in all_presets() {
        let (result, module) = run(SimulatedModule::new(), options);
        assert!(result.is_ok(), "{:?}", options);
        assert_eq!(module.count(RESET), 1);
    }
}

#[test]
fn initialize_or_halt_returns_when_every_step_succeeds() {
    let expected: [&[&str]; 3] = [
        &["AT+GAPDEVNAME=Controller Input", "AT+BleHIDEn=On", "ATZ"],
        &["AT+GAPDEVNAME=Controller", "AT+BleHIDEn=On", "ATZ"],
        &[
            "AT+GAPDEVNAME=Controller",
            "AT+BleHIDEn=On",
            "AT+GAPINTERVALS=10,50,,",
            "ATZ",
            "ATE=0",
        ],
    ];

    for (options, expected) in all_presets().into_iter().zip(expected) {
        let mut seq = Sequencer::new(SimulatedModule::new(), RecordingDelay::new(), options)
            .expect("valid options");
        seq.initialize_or_halt();
        assert_eq!(seq.state(), BringUpState::Ready);
        assert_eq!(commands(seq.module()), expected);
    }
}

#[test]
fn reset_is_last_checked_command() {
    for options in all_presets() {
        let (_, module) = run(SimulatedModule::new(), options);
        let cmds = commands(&module);
        let checked: Vec<&String> = cmds.iter().filter(|c| c.as_str() != ECHO_OFF).collect();
        assert_eq!(checked.last().map(|c| c.as_str()), Some(RESET));
    }
}

#[test]
fn tuned_preset_sends_exact_gap_parameters() {
    let (_, module) = run(SimulatedModule::new(), BringUpOptions::controller_tuned());
    let gap: Vec<String> = commands(&module)
        .into_iter()
        .filter(|c| c.starts_with("AT+GAPINTERVALS="))
        .collect();
    assert_eq!(gap.len(), 1);
    assert_eq!(&gap[0]["AT+GAPINTERVALS=".len()..], "10,50,,");
}

#[test]
fn custom_name_and_gap_are_sent_verbatim() {
    let options = BringUpOptions::new("Gamepad")
        .with_gap_intervals(GapIntervals {
            min_conn_ms: Some(15),
            max_conn_ms: Some(30),
            fast_adv_interval_ms: None,
            fast_adv_timeout_s: Some(60),
        });
    let (result, module) = run(SimulatedModule::new(), options);
    assert!(result.is_ok());
    assert_eq!(
        commands(&module),
        [
            "AT+GAPDEVNAME=Gamepad",
            "AT+BleHIDEn=On",
            "AT+GAPINTERVALS=15,30,,60",
            "ATZ",
        ]
    );
}

#[test]
fn module_can_be_lent_and_reused_by_runtime() {
    let mut module = SimulatedModule::new();
    {
        let mut seq = Sequencer::new(
            &mut module,
            RecordingDelay::new(),
            BringUpOptions::controller_input(),
        )
        .unwrap();
        seq.initialize().unwrap();
    }
    assert_eq!(module.count(HID_ENABLE), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Failure path: nothing is sent after the failing step
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn each_rejected_step_stops_the_sequence() {
    let cases: [(&'static str, Step); 4] = [
        ("AT+GAPDEVNAME=", Step::SetDeviceName),
        (HID_ENABLE, Step::EnableHidKeyboard),
        ("AT+GAPINTERVALS=", Step::SetGapIntervals),
        (RESET, Step::Reset),
    ];

    let (_, reference) = run(SimulatedModule::new(), BringUpOptions::controller_tuned());
    let full = commands(&reference);

    for (prefix, step) in cases {
        let (result, module) = run(
            SimulatedModule::rejecting(prefix),
            BringUpOptions::controller_tuned(),
        );
        let err = result.unwrap_err();
        assert_eq!(err.step(), step);
        assert_eq!(*err.cause(), SimError::Rejected);

        let sent = commands(&module);
        assert!(sent.last().unwrap().starts_with(prefix));
        // The sent commands are a strict prefix of the full sequence.
        assert!(sent.len() < full.len());
        assert_eq!(sent[..], full[..sent.len()]);
    }
}

#[test]
fn reset_rejected_after_rename_and_enable() {
    let mut seq = Sequencer::new(
        SimulatedModule::rejecting(RESET),
        RecordingDelay::new(),
        BringUpOptions::controller_input(),
    )
    .unwrap();
    let err = seq.initialize().unwrap_err();
    assert_eq!(err.diagnostic(), "err:SW reset");
    assert_eq!(seq.state(), BringUpState::Halted(Step::Reset));

    let module = seq.into_inner();
    assert_eq!(module.count("AT+GAPDEVNAME=Controller Input"), 1);
    assert_eq!(module.count(HID_ENABLE), 1);
    assert_eq!(module.count(RESET), 1);
    assert_eq!(commands(&module).last().map(String::as_str), Some(RESET));
}

#[test]
fn missing_module_sends_no_commands() {
    for options in all_presets() {
        let (result, module) = run(SimulatedModule::absent(), options);
        assert_eq!(result, Err(Error::ModuleNotFound(SimError::NotResponding)));
        assert_eq!(module.commands().count(), 0);
    }
}

#[test]
fn failure_stops_pacing_too() {
    let mut delay = RecordingDelay::new();
    let mut seq = Sequencer::new(
        SimulatedModule::rejecting("AT+GAPDEVNAME="),
        &mut delay,
        BringUpOptions::controller_paced(),
    )
    .unwrap();
    assert!(seq.initialize().is_err());
    drop(seq);
    // Only the wait between begin and rename happened.
    assert_eq!(delay.waits_ms(), &[100]);
}
