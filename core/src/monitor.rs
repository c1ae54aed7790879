// NVH Monitor — Main Loop
//
// Each cycle: sample → evaluate → indicate → base telemetry → for every
// fired alert (vibration first): indicate, notify, duplicate telemetry with
// status 1 → sleep the fixed interval. Network failures are logged and
// swallowed; a failed sensor read skips the rest of the cycle. A dropped
// Wi-Fi link gets a reconnect request before the next cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::{Thresholds, CYCLE_INTERVAL};
use crate::error::Result;
use crate::evaluator::{evaluate, Alert, Evaluation};
use crate::indicator::{AlertOutputs, IndicatorController, StatusDisplay};
use crate::link::{request_reconnect, WirelessLink};
use crate::report::{alert_message, AlertNotifier, HttpGet, TelemetryReporter};
use crate::sample::SensorReader;

/// Blocking pause between cycles and association polls.
pub trait Delay {
    fn sleep(&mut self, duration: Duration);
}

pub struct Monitor<R, D, O, H, Z> {
    reader: R,
    indicators: IndicatorController<D, O>,
    telemetry: TelemetryReporter<H>,
    notifier: AlertNotifier<H>,
    delay: Z,
    interval: Duration,
}

impl<R, D, O, H, Z> Monitor<R, D, O, H, Z>
where
    R: SensorReader,
    D: StatusDisplay,
    O: AlertOutputs,
    H: HttpGet,
    Z: Delay,
{
    pub fn new(
        reader: R,
        indicators: IndicatorController<D, O>,
        telemetry: TelemetryReporter<H>,
        notifier: AlertNotifier<H>,
        delay: Z,
    ) -> Self {
        Self {
            reader,
            indicators,
            telemetry,
            notifier,
            delay,
            interval: CYCLE_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run one cycle. Only a sensor failure is returned; everything after the
    /// read is best-effort.
    pub fn run_cycle(&mut self) -> Result<Evaluation> {
        let sample = self.reader.read()?;
        let evaluation = evaluate(&sample, &Thresholds::DEFAULT);
        let magnitude = evaluation.reported_magnitude();

        // The base send always reports 0; only the per-alert duplicates
        // carry the cycle's status flag.
        self.indicators.show_normal();
        log_levels("Normal", magnitude, sample.sound, BASE_STATUS);
        self.report(magnitude, sample.sound, BASE_STATUS);

        let status = evaluation.classification.status_flag();
        for alert in evaluation.classification.alerts() {
            log::warn!("Abnormal {} detected!", alert.label());
            self.indicators.raise(alert);
            log_levels("Alert", magnitude, sample.sound, status);
            self.notify(alert);
            self.report(magnitude, sample.sound, status);
        }

        Ok(evaluation)
    }

    /// Cycle until `stop` is set. The flag and the link are checked between
    /// cycles only; a cycle still runs while the link is down so the local
    /// indicators keep working.
    pub fn run<L>(&mut self, link: &mut L, stop: &AtomicBool)
    where
        L: WirelessLink + ?Sized,
    {
        log::info!("Monitor loop started ({} ms interval)", self.interval.as_millis());

        while !stop.load(Ordering::SeqCst) {
            if !link.is_connected() {
                log::warn!("WiFi link down, requesting reconnect");
                request_reconnect(link);
            }
            if let Err(e) = self.run_cycle() {
                log::error!("Sensor read failed, skipping cycle: {}", e);
            }
            self.delay.sleep(self.interval);
        }

        log::info!("Stop requested, monitor loop exiting");
    }

    fn report(&mut self, magnitude: f32, sound: u16, status: u8) {
        match self.telemetry.send(magnitude, sound, status) {
            Ok(code) => log::info!("Data sent: {}", code),
            Err(e) => log::warn!("Failed to send telemetry: {}", e),
        }
    }

    fn notify(&mut self, alert: Alert) {
        match self.notifier.notify(alert_message(alert)) {
            Ok(code) => log::info!("Alert message sent ({}): {}", alert.label(), code),
            Err(e) => log::warn!("Failed to send {} alert message: {}", alert.label(), e),
        }
    }
}

const BASE_STATUS: u8 = 0;

fn log_levels(label: &str, magnitude: f32, sound: u16, status: u8) {
    log::info!(
        "{}: vibration {:.2}, noise {}, alert status {}",
        label,
        magnitude,
        sound,
        status
    );
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::config::RemoteEndpoints;
    use crate::error::Error;
    use crate::evaluator::Classification;
    use crate::indicator::tests::{FakeDisplay, FakeOutputs};
    use crate::indicator::{NOISE_TEXT, NORMAL_TEXT, VIBRATION_TEXT};
    use crate::link::tests::DroppedLink;
    use crate::report::tests::RecordingHttp;
    use crate::sample::SensorSample;

    #[derive(Debug, Default)]
    pub(crate) struct CountingDelay {
        pub slept: Vec<Duration>,
    }

    impl Delay for CountingDelay {
        fn sleep(&mut self, duration: Duration) {
            self.slept.push(duration);
        }
    }

    /// Raises the stop flag once `cycles` sleeps have happened.
    struct StopAfter<'a> {
        cycles: usize,
        slept: usize,
        stop: &'a AtomicBool,
    }

    impl Delay for StopAfter<'_> {
        fn sleep(&mut self, _duration: Duration) {
            self.slept += 1;
            if self.slept >= self.cycles {
                self.stop.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Plays back scripted reads, then repeats `fallback`.
    struct ScriptedSensor {
        script: VecDeque<Result<SensorSample>>,
        fallback: SensorSample,
        reads: usize,
    }

    impl ScriptedSensor {
        fn repeating(sample: SensorSample) -> Self {
            Self {
                script: VecDeque::new(),
                fallback: sample,
                reads: 0,
            }
        }
    }

    impl SensorReader for ScriptedSensor {
        fn read(&mut self) -> Result<SensorSample> {
            self.reads += 1;
            self.script.pop_front().unwrap_or(Ok(self.fallback))
        }
    }

    type TestMonitor<Z> = Monitor<ScriptedSensor, FakeDisplay, FakeOutputs, RecordingHttp, Z>;

    fn monitor_with<Z: Delay>(sensor: ScriptedSensor, offline: bool, delay: Z) -> TestMonitor<Z> {
        let endpoints = RemoteEndpoints::new("KEY", "TOKEN", "CHAT");
        let http = || RecordingHttp {
            offline,
            ..Default::default()
        };
        Monitor::new(
            sensor,
            IndicatorController::new(FakeDisplay::default(), FakeOutputs::default()),
            TelemetryReporter::new(http(), &endpoints),
            AlertNotifier::new(http(), &endpoints),
            delay,
        )
    }

    fn monitor(sample: SensorSample) -> TestMonitor<CountingDelay> {
        monitor_with(ScriptedSensor::repeating(sample), false, CountingDelay::default())
    }

    fn telemetry_statuses<Z>(m: &TestMonitor<Z>) -> Vec<char> {
        m.telemetry
            .http()
            .urls
            .iter()
            .filter_map(|url| url.chars().last())
            .collect()
    }

    fn shown_status<Z>(m: &TestMonitor<Z>) -> String {
        m.indicators
            .display()
            .shown
            .last()
            .map(|(_, text)| text.clone())
            .unwrap_or_default()
    }

    fn quiet() -> SensorSample {
        SensorSample {
            ax: 0.2,
            ay: 0.1,
            az: 0.9,
            gx: 5.0,
            gy: 3.0,
            gz: 2.0,
            sound: 1000,
        }
    }

    fn shaking() -> SensorSample {
        SensorSample {
            ax: 2.0,
            sound: 1000,
            ..Default::default()
        }
    }

    fn loud() -> SensorSample {
        SensorSample {
            sound: 5000,
            ..Default::default()
        }
    }

    fn shaking_and_loud() -> SensorSample {
        SensorSample {
            ax: 2.0,
            sound: 5000,
            ..Default::default()
        }
    }

    #[test]
    fn normal_cycle_sends_base_telemetry_only() {
        let mut m = monitor(quiet());
        let eval = m.run_cycle().unwrap();

        assert!(eval.classification.is_normal());
        assert_eq!(telemetry_statuses(&m), vec!['0']);
        assert!(m.notifier.http().urls.is_empty());
        assert_eq!(shown_status(&m), NORMAL_TEXT);
        assert!(m.indicators.outputs().buzzer);
        assert!(!m.indicators.outputs().light);
    }

    #[test]
    fn vibration_cycle_notifies_once_and_duplicates_telemetry() {
        let mut m = monitor(shaking());
        let eval = m.run_cycle().unwrap();

        assert_eq!(
            eval.classification,
            Classification {
                vibration: true,
                noise: false
            }
        );
        assert_eq!(telemetry_statuses(&m), vec!['0', '1']);
        let messages = &m.notifier.http().urls;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("vibration"));
        assert_eq!(shown_status(&m), VIBRATION_TEXT);
        assert!(!m.indicators.outputs().buzzer);
        assert!(m.indicators.outputs().light);
    }

    #[test]
    fn noise_cycle_notifies_once_and_duplicates_telemetry() {
        let mut m = monitor(loud());
        m.run_cycle().unwrap();

        assert_eq!(telemetry_statuses(&m), vec!['0', '1']);
        let messages = &m.notifier.http().urls;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Noise"));
        assert_eq!(shown_status(&m), NOISE_TEXT);
        assert!(m.indicators.outputs().buzzer);
        assert!(m.indicators.outputs().light);
    }

    #[test]
    fn both_alerts_fire_independently_and_noise_wins_the_panel() {
        let mut m = monitor(shaking_and_loud());
        m.run_cycle().unwrap();

        assert_eq!(telemetry_statuses(&m), vec!['0', '1', '1']);
        let messages = &m.notifier.http().urls;
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("vibration"));
        assert!(messages[1].contains("Noise"));
        assert_eq!(shown_status(&m), NOISE_TEXT);
        assert!(m.indicators.outputs().buzzer);
        assert!(m.indicators.outputs().light);
    }

    #[test]
    fn telemetry_reports_rounded_magnitude() {
        let mut m = monitor(shaking_and_loud());
        m.run_cycle().unwrap();
        assert!(m.telemetry.http().urls[0].contains("field1=2.00&field2=5000&field3=0"));
    }

    #[test]
    fn network_failures_do_not_stop_the_loop() {
        let stop = AtomicBool::new(false);
        let delay = StopAfter {
            cycles: 3,
            slept: 0,
            stop: &stop,
        };
        let mut m = monitor_with(ScriptedSensor::repeating(shaking_and_loud()), true, delay);
        m.run(&mut DroppedLink::up(), &stop);

        assert_eq!(m.reader.reads, 3);
        assert_eq!(m.telemetry.http().urls.len(), 9);
        assert_eq!(m.notifier.http().urls.len(), 6);
        assert_eq!(m.delay.slept, 3);
        // indicators were still applied despite the network being down
        assert_eq!(shown_status(&m), NOISE_TEXT);
    }

    #[test]
    fn sensor_failure_skips_only_that_cycle() {
        let stop = AtomicBool::new(false);
        let mut sensor = ScriptedSensor::repeating(quiet());
        sensor
            .script
            .push_back(Err(Error::PeripheralUnavailable("IMU NAK".into())));
        let delay = StopAfter {
            cycles: 2,
            slept: 0,
            stop: &stop,
        };
        let mut m = monitor_with(sensor, false, delay);
        m.run(&mut DroppedLink::up(), &stop);

        assert_eq!(m.reader.reads, 2);
        assert_eq!(m.delay.slept, 2);
        assert_eq!(telemetry_statuses(&m), vec!['0']);
    }

    #[test]
    fn run_cycle_surfaces_sensor_error() {
        let mut sensor = ScriptedSensor::repeating(quiet());
        sensor
            .script
            .push_back(Err(Error::PeripheralUnavailable("bus".into())));
        let mut m = monitor_with(sensor, false, CountingDelay::default());

        assert!(matches!(m.run_cycle(), Err(Error::PeripheralUnavailable(_))));
        assert!(m.telemetry.http().urls.is_empty());
        assert_eq!(m.indicators.display().flushes, 0);
    }

    #[test]
    fn preset_stop_flag_runs_no_cycles() {
        let stop = AtomicBool::new(true);
        let mut m = monitor(quiet());
        m.run(&mut DroppedLink::up(), &stop);

        assert_eq!(m.reader.reads, 0);
        assert!(m.delay.slept.is_empty());
    }

    #[test]
    fn sleeps_configured_interval_after_each_cycle() {
        let stop = AtomicBool::new(false);
        let delay = StopAfter {
            cycles: 1,
            slept: 0,
            stop: &stop,
        };
        let mut m = monitor_with(ScriptedSensor::repeating(quiet()), false, delay)
            .with_interval(Duration::from_millis(250));
        assert_eq!(m.interval, Duration::from_millis(250));
        m.run(&mut DroppedLink::up(), &stop);
        assert_eq!(m.delay.slept, 1);

        assert_eq!(monitor(quiet()).interval, CYCLE_INTERVAL);
    }

    #[test]
    fn dropped_link_gets_reconnect_between_cycles() {
        let stop = AtomicBool::new(false);
        let delay = StopAfter {
            cycles: 3,
            slept: 0,
            stop: &stop,
        };
        let mut m = monitor_with(ScriptedSensor::repeating(quiet()), false, delay);
        // Needs two reconnects: one before each of the first two cycles.
        let mut link = DroppedLink::down_until(2);
        m.run(&mut link, &stop);

        assert_eq!(link.reconnects, 2);
        assert!(link.is_connected());
        // cycles still ran while the link was down
        assert_eq!(m.reader.reads, 3);
    }

    #[test]
    fn healthy_link_is_left_alone() {
        let stop = AtomicBool::new(false);
        let delay = StopAfter {
            cycles: 4,
            slept: 0,
            stop: &stop,
        };
        let mut m = monitor_with(ScriptedSensor::repeating(quiet()), false, delay);
        let mut link = DroppedLink::up();
        m.run(&mut link, &stop);

        assert_eq!(link.reconnects, 0);
        assert_eq!(m.reader.reads, 4);
    }

    #[test]
    fn identical_samples_give_identical_cycles() {
        let mut m = monitor(shaking());
        let first = m.run_cycle().unwrap();
        let first_panel = m.indicators.display().shown.clone();

        for _ in 0..5 {
            assert_eq!(m.run_cycle().unwrap(), first);
            assert_eq!(m.indicators.display().shown, first_panel);
            assert!(!m.indicators.outputs().buzzer);
            assert!(m.indicators.outputs().light);
        }
        assert_eq!(m.telemetry.http().urls.len(), 12);
        assert_eq!(m.notifier.http().urls.len(), 6);
    }
}
