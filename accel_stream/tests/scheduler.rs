mod common;

use accel_stream::{CycleOutcome, Error, ReadyFlag, ResolutionMode, SamplingScheduler, State};
use common::*;
use lis3dh::TransactionError;

fn scheduler<'a, S: FrameSink>(
    expectations: &[I2cTrans],
    mode: ResolutionMode,
    sink: S,
    ready: &'a ReadyFlag,
) -> SamplingScheduler<'a, I2cMock, S> {
    SamplingScheduler::new(Lis3dh::new(I2cMock::new(expectations), DEV_ADDR), mode, sink, ready)
}

fn finish<S>(scheduler: SamplingScheduler<'_, I2cMock, S>) -> S
where
    S: FrameSink,
{
    let (sensor, sink) = scheduler.release();
    sensor.destroy().done();
    sink
}

#[test]
fn no_tick_means_no_bus_traffic() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(&[], ResolutionMode::NORMAL_COUNTS, VecSink::default(), &ready);

    assert_eq!(sampler.poll(), Ok(CycleOutcome::Idle));
    assert_eq!(sampler.stats().cycles, 0);
    assert!(finish(sampler).frames.is_empty());
}

#[test]
fn tick_without_new_data_clears_flag_and_emits_nothing() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[trans_status(0x07)],
        ResolutionMode::NORMAL_COUNTS,
        VecSink::default(),
        &ready,
    );

    ready.set();
    assert_eq!(sampler.poll(), Ok(CycleOutcome::NoNewData));
    assert!(!ready.is_set());
    assert_eq!(sampler.stats().no_data, 1);
    assert!(finish(sampler).frames.is_empty());
}

#[test]
fn count_mode_cycle_emits_one_frame() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[trans_status(0x08), trans_axes([0x00, 0x40, 0x00, 0x20, 0x00, 0x10])],
        ResolutionMode::NORMAL_COUNTS,
        VecSink::default(),
        &ready,
    );

    ready.set();
    assert_eq!(
        sampler.poll(),
        Ok(CycleOutcome::Emitted { len: 8, overrun: false })
    );
    assert!(!ready.is_set());
    assert_eq!(sampler.state(), State::Idle);
    assert_eq!(sampler.stats().frames, 1);

    let sink = finish(sampler);
    assert_eq!(sink.frames, vec![vec![0xA0, 0x00, 0x04, 0x00, 0x01, 0x80, 0x00, 0xC0]]);
}

#[test]
fn physical_mode_zero_sample_frame() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[trans_status(0x0F), trans_axes([0; 6])],
        ResolutionMode::HIGH_RESOLUTION_PHYSICAL,
        VecSink::default(),
        &ready,
    );

    ready.set();
    assert_eq!(
        sampler.poll(),
        Ok(CycleOutcome::Emitted { len: 14, overrun: false })
    );

    let sink = finish(sampler);
    let mut expected = vec![0u8; 14];
    expected[0] = 0xA0;
    expected[13] = 0xC0;
    assert_eq!(sink.frames, vec![expected]);
}

#[test]
fn physical_mode_scales_to_milli_units() {
    let ready = ReadyFlag::new();
    // X = 1024 digits, Y = -1 digit, Z = 0
    let mut sampler = scheduler(
        &[trans_status(0x08), trans_axes([0x00, 0x40, 0xF0, 0xFF, 0x00, 0x00])],
        ResolutionMode::HIGH_RESOLUTION_PHYSICAL,
        VecSink::default(),
        &ready,
    );

    ready.set();
    sampler.poll().unwrap();

    let sink = finish(sampler);
    assert_eq!(
        sink.frames[0],
        vec![
            0xA0,
            0x72, 0x4E, 0x00, 0x00,
            0xED, 0xFF, 0xFF, 0xFF,
            0x00, 0x00, 0x00, 0x00,
            0xC0,
        ]
    );
}

#[test]
fn failed_status_read_keeps_flag_for_retry() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[
            trans_status(0x00).with_error(NACK),
            trans_status(0x08),
            trans_axes([0; 6]),
        ],
        ResolutionMode::NORMAL_COUNTS,
        VecSink::default(),
        &ready,
    );

    ready.set();
    assert_eq!(
        sampler.poll(),
        Err(Error::Sensor(lis3dh::Error::Transaction(TransactionError::NoAck)))
    );
    assert!(ready.is_set());
    assert_eq!(sampler.state(), State::Idle);
    assert_eq!(sampler.stats().bus_errors, 1);

    assert_eq!(
        sampler.poll(),
        Ok(CycleOutcome::Emitted { len: 8, overrun: false })
    );
    assert!(!ready.is_set());
    assert_eq!(finish(sampler).frames.len(), 1);
}

#[test]
fn failed_burst_read_emits_no_partial_frame() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[
            trans_status(0x08),
            trans_axes([0; 6]).with_error(ErrorKind::Bus),
        ],
        ResolutionMode::NORMAL_COUNTS,
        VecSink::default(),
        &ready,
    );

    ready.set();
    assert_eq!(
        sampler.poll(),
        Err(Error::Sensor(lis3dh::Error::Transaction(TransactionError::BusError)))
    );
    assert!(ready.is_set());
    assert!(finish(sampler).frames.is_empty());
}

#[test]
fn overrun_is_counted_but_sample_still_sent() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[trans_status(0x88), trans_axes([0; 6])],
        ResolutionMode::NORMAL_COUNTS,
        VecSink::default(),
        &ready,
    );

    ready.set();
    assert_eq!(
        sampler.poll(),
        Ok(CycleOutcome::Emitted { len: 8, overrun: true })
    );
    assert_eq!(sampler.stats().overruns, 1);
    assert_eq!(finish(sampler).frames.len(), 1);
}

#[test]
fn overrun_without_new_data_is_ignored() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[trans_status(0x80)],
        ResolutionMode::NORMAL_COUNTS,
        VecSink::default(),
        &ready,
    );

    ready.set();
    assert_eq!(sampler.poll(), Ok(CycleOutcome::NoNewData));
    assert_eq!(sampler.stats().overruns, 0);
    finish(sampler);
}

#[test]
fn sink_failure_consumes_the_tick() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[trans_status(0x08), trans_axes([0; 6])],
        ResolutionMode::NORMAL_COUNTS,
        FailingSink::default(),
        &ready,
    );

    ready.set();
    assert_eq!(sampler.poll(), Err(Error::Sink(TxBusy)));
    assert!(!ready.is_set());
    assert_eq!(sampler.stats().sink_errors, 1);
    assert_eq!(sampler.stats().frames, 0);
    assert_eq!(finish(sampler).attempts, 1);
}

#[test]
fn free_running_poll_ignores_the_flag() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[trans_status(0x08), trans_axes([0; 6]), trans_status(0x00)],
        ResolutionMode::LOW_POWER_COUNTS,
        VecSink::default(),
        &ready,
    );

    assert_eq!(
        sampler.poll_free_running(),
        Ok(CycleOutcome::Emitted { len: 8, overrun: false })
    );
    assert_eq!(sampler.poll_free_running(), Ok(CycleOutcome::NoNewData));
    assert!(!ready.is_set());
    assert_eq!(finish(sampler).frames.len(), 1);
}

#[test]
fn consecutive_ticks_emit_consecutive_frames() {
    let ready = ReadyFlag::new();
    let mut sampler = scheduler(
        &[
            trans_status(0x08),
            trans_axes([0x40, 0x00, 0x00, 0x00, 0x00, 0x00]),
            trans_status(0x08),
            trans_axes([0x80, 0x00, 0x00, 0x00, 0x00, 0x00]),
        ],
        ResolutionMode::NORMAL_COUNTS,
        VecSink::default(),
        &ready,
    );

    ready.set();
    sampler.poll().unwrap();
    // flag already consumed, nothing happens until the next tick
    assert_eq!(sampler.poll(), Ok(CycleOutcome::Idle));
    ready.set();
    sampler.poll().unwrap();

    let sink = finish(sampler);
    assert_eq!(sink.frames.len(), 2);
    assert_eq!(&sink.frames[0][1..3], &[0x04, 0x00]);
    assert_eq!(&sink.frames[1][1..3], &[0x08, 0x00]);
}
