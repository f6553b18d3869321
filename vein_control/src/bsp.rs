
pub mod pin {
    /// A pin (of a button) which may be down (tied to the ground) or up (pulled up).
    /// Buttons are active-low, so a pin which is down is a pressed button.
    pub trait Pin {
        fn is_down(&self) -> bool;
    }
}

pub mod led {
    /// PWM driven LED channel. [duty] is in the domain of the configured `duty_max`,
    /// conversion into the timer registers is up to the implementation.
    pub trait Led {
        fn set(&self, duty: u32);
        fn get(&self) -> u32;
    }
}

pub mod indicator {
    /// Binary output which shows whether its channel is the active one
    pub trait Indicator {
        fn set_on(&self, on: bool);
        fn is_on(&self) -> bool;
    }
}
