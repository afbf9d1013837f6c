//! Multi-tick scenario tests exercising mass, gravity and collision together

mod scenarios;
