use crate::{
    activity::{ActivityClock, ActivityLevel},
    clock::Clock,
    config::PadConfig,
    error::PadError,
    keymap::{Action, KeyMap, MacroStep},
    light::{LightController, PixelDriver},
    output::{OutputEmitter, TransmissionError},
    transport::{Edge, EdgeEvent, EdgeObserver, InputTransport, TransportError},
};

pub struct MacroPad<P, O, C> {
    config: PadConfig,
    keymap: KeyMap,
    activity: ActivityClock,
    lights: LightController<P, C>,
    emitter: O,
    clock: C,
}

impl<P, O, C> MacroPad<P, O, C>
where
    P: PixelDriver,
    O: OutputEmitter,
    C: Clock + Clone,
{
    pub fn new(
        config: PadConfig,
        keymap: KeyMap,
        pixels: P,
        emitter: O,
        clock: C,
    ) -> Result<Self, PadError> {
        config.validate()?;

        let mut lights = LightController::new(
            pixels,
            clock.clone(),
            keymap.standby_colors(),
            config.off_color,
            config.animation_step,
        );
        lights.boot_sequence(
            config.boot_color,
            config.boot_pause,
            config.active_brightness,
        );

        let activity = ActivityClock::new(
            clock.now(),
            config.standby_timeout,
            config.sleep_timeout,
        );
        log::info!("Macro pad ready");

        Ok(Self {
            config,
            keymap,
            activity,
            lights,
            emitter,
            clock,
        })
    }

    pub fn activity(&self) -> &ActivityClock {
        &self.activity
    }

    pub fn lights(&self) -> &LightController<P, C> {
        &self.lights
    }

    pub fn emitter(&self) -> &O {
        &self.emitter
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    // Only a transport failure gets out
    pub fn run<T: InputTransport>(&mut self, transport: &mut T) -> Result<(), TransportError> {
        transport.arm_all();
        self.activity.touch(self.clock.now());
        loop {
            self.tick(transport)?;
        }
    }

    pub fn tick<T: InputTransport>(&mut self, transport: &mut T) -> Result<(), TransportError> {
        transport.sync(self)?;
        self.clock.sleep(self.config.tick);
        self.update_activity();
        Ok(())
    }

    pub fn update_activity(&mut self) {
        let now = self.clock.now();

        if self.activity.should_enter_standby(now) {
            log::info!("No input for {:?}, entering standby", self.config.standby_timeout);
            self.lights.set_brightness(self.config.standby_brightness);
            self.activity.mark_standby();
        }

        if self.activity.should_enter_sleep(now) {
            log::info!("No input for {:?}, going to sleep", self.config.sleep_timeout);
            self.lights.sleep_sequence(self.config.sleep_brightness);
            self.activity.mark_asleep();
        }
    }

    pub fn handle_edge(&mut self, event: EdgeEvent) -> Result<(), PadError> {
        match event.edge {
            Edge::Rising => self.on_press(event.key),
            Edge::Falling => self.on_release(event.key),
        }
    }

    fn on_press(&mut self, key: usize) -> Result<(), PadError> {
        let binding = self.keymap.get(key)?;
        let was_standby = self.activity.is_standby();
        self.activity.touch(self.clock.now());

        // First press after sleep only wakes the pad
        if self.activity.level() == ActivityLevel::Asleep {
            log::info!("Key {} woke the pad", key);
            self.lights.wake_sequence(self.config.active_brightness);
            self.activity.wake();
            return Ok(());
        }

        if was_standby {
            log::debug!("Leaving standby");
            self.lights.set_brightness(self.config.active_brightness);
        }
        self.lights.set(key, binding.press_color)?;

        if !binding.action.is_bound() {
            log::info!("{}", PadError::UnboundKeyPressed(key));
            return Ok(());
        }

        if let Err(err) = run_action(&binding.action, &mut self.emitter, &self.clock) {
            log::warn!("Key {}: {}", key, PadError::from(err));
        }
        Ok(())
    }

    fn on_release(&mut self, key: usize) -> Result<(), PadError> {
        let standby_color = self.keymap.get(key)?.standby_color;
        self.lights.set(key, standby_color)
    }
}

impl<P, O, C> EdgeObserver for MacroPad<P, O, C>
where
    P: PixelDriver,
    O: OutputEmitter,
    C: Clock + Clone,
{
    fn on_edge(&mut self, event: EdgeEvent) {
        // Contained here so a bad edge never stops the loop
        if let Err(err) = self.handle_edge(event) {
            match err {
                PadError::InvalidKeyIndex(_) => log::error!("Dropped {:?}: {}", event, err),
                _ => log::warn!("Edge {:?} failed: {}", event, err),
            }
        }
    }
}

fn run_action<O, C>(action: &Action, emitter: &mut O, clock: &C) -> Result<(), TransmissionError>
where
    O: OutputEmitter,
    C: Clock,
{
    match action {
        Action::None | Action::Wake => Ok(()),
        Action::KeyCombo(codes) => {
            log::info!("Sending {:?}", codes);
            emitter.send_keys(codes)
        }
        Action::Media(code) => {
            log::info!("Sending {:?}", code);
            emitter.send_media(*code)
        }
        Action::Macro(steps) => {
            log::info!("Running macro of {} steps", steps.len());
            for step in steps {
                // A failed step abandons the rest of the macro
                match step {
                    MacroStep::Keys(codes) => emitter.send_keys(codes)?,
                    MacroStep::Media(code) => emitter.send_media(*code)?,
                    MacroStep::Pause(duration) => clock.sleep(*duration),
                }
            }
            Ok(())
        }
    }
}
