//! Contact form placeholder: submissions are acknowledged, never sent

use crate::effect::Effect;

pub const ACKNOWLEDGEMENT: &str = "Thanks! Your message has been captured (demo).";

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    submissions: u32,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    pub fn submit(&mut self) -> Vec<Effect> {
        self.submissions += 1;
        vec![
            Effect::Alert {
                message: ACKNOWLEDGEMENT.to_string(),
            },
            Effect::ResetForm,
        ]
    }
}
