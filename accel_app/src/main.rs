#![no_std]
#![no_main]

mod rtt_logger;
mod serial_sink;

use panic_rtt_target as _;

use accel_stream::{ReadyFlag, ResolutionMode};

/// Set by the TIM2 update interrupt, consumed by the sampling loop in `idle`.
static READY: ReadyFlag = ReadyFlag::new();

const fn selected_mode() -> ResolutionMode {
    if cfg!(feature = "physical-units") {
        ResolutionMode::HIGH_RESOLUTION_PHYSICAL
    } else if cfg!(feature = "low-power") {
        ResolutionMode::LOW_POWER_COUNTS
    } else {
        ResolutionMode::NORMAL_COUNTS
    }
}

#[rtic::app(device = stm32f4xx_hal::pac)]
mod app {
    use accel_stream::{startup, SamplerConfig, SamplingScheduler};
    use log::LevelFilter;
    use rtt_target::rprintln;
    use stm32f4xx_hal::{
        i2c::I2c,
        pac::{I2C1, TIM2, USART2},
        prelude::*,
        serial::{Config, Tx},
        timer::{CounterMs, Event, Flag},
    };

    use crate::rtt_logger;
    use crate::serial_sink::SerialSink;
    use crate::{selected_mode, READY};

    type Sampler = SamplingScheduler<'static, I2c<I2C1>, SerialSink<Tx<USART2>>>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        sampler: Sampler,
        tick: CounterMs<TIM2>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local) {
        let _rtt_channels = rtt_target::rtt_init! {
            up: {
                0: {
                    size: 4096,
                    mode: rtt_target::ChannelMode::NoBlockSkip
                }
            }
            down: {
                0: {
                    size: 16
                }
            }
        };
        rtt_target::set_print_channel(_rtt_channels.up.0);
        rtt_logger::init(LevelFilter::Info);
        rprintln!("RTIC #[init] started");

        let config = SamplerConfig::default().with_mode(selected_mode());

        let dp = ctx.device;
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr
            .sysclk(84.MHz())
            .freeze();

        let mut delay = dp.TIM5.delay_us(&clocks);

        rprintln!("SYSCLK: {} Hz", clocks.sysclk());
        rprintln!("PCLK1:  {} Hz", clocks.pclk1());

        let gpioa = dp.GPIOA.split();
        let gpiob = dp.GPIOB.split();

        let scl = gpiob.pb8.into_alternate::<4>().set_open_drain();
        let sda = gpiob.pb9.into_alternate::<4>().set_open_drain();
        let i2c = I2c::new(dp.I2C1, (scl, sda), 100.kHz(), &clocks);

        let tx: Tx<USART2> = dp
            .USART2
            .tx(gpioa.pa2, Config::default().baudrate(115_200.bps()), &clocks)
            .unwrap();

        rprintln!("I2C and UART init complete");

        let mut sensor = config.sensor(i2c);
        let report = startup::run(&mut sensor, &config.mode, &mut delay);
        if !report.identity_ok() || !report.configured() {
            rprintln!("Startup finished with errors, sampling anyway: {:?}", report);
        }

        rprintln!(
            "Sampling every {} ms, {} byte frames",
            config.tick_period_ms,
            config.mode.frame_len()
        );

        let mut tick = dp.TIM2.counter_ms(&clocks);
        tick.start(config.tick_period_ms.millis()).unwrap();
        tick.listen(Event::Update);

        let sampler = SamplingScheduler::new(sensor, config.mode, SerialSink::new(tx), &READY);

        (Shared {}, Local { sampler, tick })
    }

    #[task(binds = TIM2, priority = 2, local = [tick])]
    fn on_tick(cx: on_tick::Context) {
        cx.local.tick.clear_flags(Flag::Update);
        READY.set();
    }

    #[idle(local = [sampler])]
    fn idle(cx: idle::Context) -> ! {
        cx.local.sampler.run_forever(cortex_m::asm::nop)
    }
}
