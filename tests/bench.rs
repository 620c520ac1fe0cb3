use embedded_hal::digital::{ErrorType, OutputPin};
use pll_bench::{
    bench, cycle_counter::CycleCounter, probe::LogProbe, settings::Settings,
    table_file, Error,
};
use pll_q30::{SineTable, Snapshot};

/// Advances a fixed amount per read.
struct Ticks {
    now: u64,
    step: u64,
}

impl CycleCounter for Ticks {
    fn cycles(&mut self) -> u64 {
        self.now += self.step;
        self.now
    }
}

/// A pin that can not be driven.
struct Broken;

impl ErrorType for Broken {
    type Error = embedded_hal::digital::ErrorKind;
}

impl OutputPin for Broken {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(embedded_hal::digital::ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(embedded_hal::digital::ErrorKind::Other)
    }
}

const EXACT: Snapshot = Snapshot {
    theta: 0x0966_dfa6,
    sin: 0x32b1_dfc9,
    cos: 0x2710_830c,
    integrator: 657_046_907,
    out_f: 0x6471_ba1b,
    delta_f: 0x6471_ba1b - (50 << 25),
};

const RECIPROCAL: Snapshot = Snapshot {
    theta: 0x0966_f446,
    sin: 0x32b1_dfc9,
    cos: 0x2710_830c,
    integrator: 657_063_952,
    out_f: 0x6471_bc2f,
    delta_f: 0x6471_bc2f - (50 << 25),
};

#[test]
fn reference_run() {
    let settings = Settings::default();
    let mut counter = Ticks {
        now: 0,
        step: 1024 * 40,
    };
    let mut probe = LogProbe::new();
    let reports = bench::run_all(
        &settings,
        SineTable::reference(),
        &mut counter,
        &mut probe,
    )
    .unwrap();

    assert_eq!(reports.len(), 2);
    let (exact, reciprocal) = (&reports[0], &reports[1]);
    assert_eq!(exact.strategy, "exact");
    assert_eq!(reciprocal.strategy, "reciprocal");
    assert_eq!(exact.state, EXACT);
    assert_eq!(reciprocal.state, RECIPROCAL);

    for r in &reports {
        assert_eq!((r.settle, r.window), (20_000, 1024));
        assert_eq!(r.cycles, 1024 * 40);
        assert_eq!(r.cycles_per_sample, 40);
        assert!(r.out_f.min > 50. && r.out_f.max < 51.1);
        assert!((r.out_f.mean - 50.67).abs() < 0.05, "{}", r.out_f.mean);
    }

    assert_eq!(
        (exact.out_f_q25.min, exact.out_f_q25.max, exact.out_f_q25.mean),
        (1_685_174_811, 1_713_990_230, 1_700_057_991)
    );
    assert_eq!(
        (reciprocal.out_f_q25.min, reciprocal.out_f_q25.max),
        (1_685_175_343, 1_713_991_796)
    );

    // One high period per window.
    assert_eq!((probe.rising_edges(), probe.falling_edges()), (2, 2));
    assert_eq!(bench::theta_difference(&exact.state, &reciprocal.state), -5280);
}

#[test]
fn report_text() {
    let mut settings = Settings::default();
    settings.apply("/strategy=\"Exact\"").unwrap();
    let reports = bench::run_all(
        &settings,
        SineTable::reference(),
        &mut Ticks { now: 7, step: 3 },
        &mut LogProbe::new(),
    )
    .unwrap();
    assert_eq!(reports.len(), 1);

    let text = reports[0].to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "[exact] cycles = 3 (N=1024)  cycles/sample = 0");
    assert_eq!(
        lines[1],
        "theta_q30=0x0966dfa6  sin=0x32b1dfc9 cos=0x2710830c  Out_f(Q25)=0x6471ba1b"
    );
    assert_eq!(lines[4], "Out_f(Hz)=50.222122");
}

#[test]
fn short_window() {
    let mut settings = Settings::default();
    settings.set("/settle", "0").unwrap();
    settings.set("/window", "4").unwrap();
    settings.set("/strategy", "\"Exact\"").unwrap();
    let reports = bench::run_all(
        &settings,
        SineTable::reference(),
        &mut Ticks { now: 0, step: 1 },
        &mut LogProbe::new(),
    )
    .unwrap();
    let s = reports[0].state;
    // First four HDL comparison vectors.
    assert_eq!(s.theta, 0x51eb7c);
    assert_eq!(s.sin, 19_764_076);
    assert_eq!(s.integrator, -709);
    assert_eq!(s.delta_f, -5707);
    assert_eq!(s.out_f, 1_677_715_893);
}

#[test]
fn probe_failure() {
    let settings = Settings::default();
    let r = bench::run_all(
        &settings,
        SineTable::reference(),
        &mut Ticks { now: 0, step: 1 },
        &mut Broken,
    );
    assert!(matches!(r, Err(Error::Probe(_))));
}

#[test]
fn rejects_invalid_settings() {
    let run = |settings: &Settings| {
        let mut probe = LogProbe::new();
        let r = bench::run_all(
            settings,
            SineTable::reference(),
            &mut Ticks { now: 0, step: 1 },
            &mut probe,
        );
        // Nothing is measured.
        assert_eq!(probe.rising_edges(), 0);
        r
    };

    let mut settings = Settings::default();
    settings.window = 0.into();
    assert!(matches!(
        run(&settings),
        Err(Error::Setting { path, .. }) if path == "/window"
    ));

    let mut settings = Settings::default();
    settings.input_frequency = 40_000.into();
    assert!(matches!(
        run(&settings),
        Err(Error::Setting { path, .. }) if path == "/input_frequency"
    ));

    let mut settings = Settings::default();
    settings.cpu_frequency = 0.into();
    assert!(run(&settings).is_err());
}

#[test]
fn external_table() {
    let text = SineTable::reference()
        .samples()
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let header = format!("const int32_t t[1024] = {{ {text} }};");
    let table = table_file::parse(&header).unwrap();

    let mut settings = Settings::default();
    settings.apply("/strategy=\"Reciprocal\"").unwrap();
    let reports = bench::run_all(
        &settings,
        &table,
        &mut Ticks { now: 0, step: 1 },
        &mut LogProbe::new(),
    )
    .unwrap();
    assert_eq!(reports[0].state, RECIPROCAL);
}
