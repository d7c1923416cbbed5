use std::fs;

use oxide_dsp::dsp::{FilterType, NoteRate};
use oxide_dsp::fx::DistortionAlgorithm;
use oxide_dsp::preset::{factory_preset, factory_presets, Preset, PresetStore};
use oxide_dsp::{ChainConfig, ChainState, Error, SignalChain};

#[test]
fn open_installs_factory_bank_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::open(dir.path().join("Presets")).unwrap();

    let mut expected: Vec<String> = factory_presets().into_iter().map(|p| p.name).collect();
    expected.sort();
    assert_eq!(store.list().unwrap(), expected);

    // Already populated: nothing more is written.
    assert_eq!(store.install_factory_presets().unwrap(), 0);
}

#[test]
fn installed_presets_load_back_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::open(dir.path()).unwrap();

    for preset in factory_presets() {
        let loaded = store.load(&preset.name).unwrap();
        assert_eq!(loaded, preset, "{}", preset.name);
    }
}

#[test]
fn user_directory_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Mine.xml"), r#"<OxidePreset name="Mine"/>"#).unwrap();

    let store = PresetStore::open(dir.path()).unwrap();
    assert_eq!(store.list().unwrap(), vec!["Mine".to_string()]);
}

#[test]
fn empty_store_lists_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::new(dir.path());
    assert_eq!(store.list().unwrap(), vec!["Default".to_string()]);
}

#[test]
fn save_then_load_by_any_spelling() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::new(dir.path());

    let mut state = ChainState::default();
    state.distortion.set_algorithm(DistortionAlgorithm::Waveshaper);
    state.distortion.set_output_gain(-4.5);
    state.delay.set_ping_pong(true);
    state.filter.set_filter_type(FilterType::BandPass);
    state.pulse.set_rate(NoteRate::Eighth);

    let path = store.save("My Patch", &state).unwrap();
    assert_eq!(path, dir.path().join("My Patch.xml"));

    for name in ["My Patch", "My Patch.xml", "My_Patch", "my_patch", "MY PATCH"] {
        let preset = store.load(name).unwrap();
        assert_eq!(preset.name, "My Patch", "{name}");
        assert_eq!(preset.state, state, "{name}");
    }

    assert!(matches!(store.load("Their Patch"), Err(Error::PresetNotFound(_))));
}

#[test]
fn save_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::new(dir.path());

    let mut state = ChainState::default();
    store.save("Twice", &state).unwrap();
    state.distortion.set_drive(0.9);
    store.save("Twice", &state).unwrap();

    assert_eq!(store.list().unwrap(), vec!["Twice".to_string()]);
    assert_eq!(store.load("Twice").unwrap().state.distortion.drive(), 0.9);
}

#[test]
fn unusable_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::new(dir.path());

    for name in ["", "  ", "../outside", "a/b"] {
        assert!(matches!(
            store.save(name, &ChainState::default()),
            Err(Error::InvalidPreset(_))
        ));
    }
}

#[test]
fn nameless_file_takes_its_stem() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Bare.xml"),
        r#"<OxidePreset><Distortion drive="0.25"/></OxidePreset>"#,
    )
    .unwrap();

    let preset = PresetStore::new(dir.path()).load("Bare").unwrap();
    assert_eq!(preset.name, "Bare");
    assert_eq!(preset.state.distortion.drive(), 0.25);
}

#[test]
fn partial_file_loads_onto_current_state() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Pulse Only.xml"),
        r#"<OxidePreset name="Pulse Only"><Pulse mix="0.9" rate="1/2"/></OxidePreset>"#,
    )
    .unwrap();

    let base = factory_preset("Heavy Metal").unwrap().state;
    let preset = PresetStore::new(dir.path())
        .load_onto("Pulse Only", &base)
        .unwrap();

    assert_eq!(preset.state.distortion, base.distortion);
    assert_eq!(preset.state.delay, base.delay);
    assert_eq!(preset.state.filter, base.filter);
    assert_eq!(preset.state.pulse.mix(), 0.9);
    assert_eq!(preset.state.pulse.rate(), NoteRate::Half);
}

#[test]
fn broken_files_report_errors() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Bad Number.xml"),
        r#"<OxidePreset><Filter frequency="loud"/></OxidePreset>"#,
    )
    .unwrap();
    fs::write(dir.path().join("Wrong Root.xml"), r#"<Preset/>"#).unwrap();

    let store = PresetStore::new(dir.path());
    match store.load("Bad Number") {
        Err(Error::InvalidNumber { attribute, value }) => {
            assert_eq!(attribute, "Filter.frequency");
            assert_eq!(value, "loud");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(store.load("Wrong Root"), Err(Error::InvalidPreset(_))));
}

#[test]
fn loaded_preset_reaches_the_audio_side() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::open(dir.path()).unwrap();
    let (mut chain, mut handle) = SignalChain::new(ChainConfig::new(48_000.0, 64));

    let Preset { state, .. } = store.load("fuzz").unwrap();
    handle.set_state(state);

    let mut block = vec![0.0f32; 64];
    chain.process_block(&mut [block.as_mut_slice()], None);

    let applied = chain.state();
    assert_eq!(applied.distortion, state.distortion);
    assert_eq!(applied.delay, state.delay);
    assert_eq!(applied.filter, state.filter);
    assert_eq!(applied.pulse.mix(), state.pulse.mix());
}
