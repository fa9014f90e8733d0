//! SimpleMotion V2 output report encoding (torque commands and control).
//!
//! This module provides encoders for sending torque commands and control
//! messages to SimpleMotion V2 devices over USB HID.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]

use crate::commands::{SmCommand, SmCommandType, encode_command};

pub const TORQUE_COMMAND_LEN: usize = 15;
pub const FEEDBACK_REPORT_LEN: usize = 64;
pub const SETPARAM_REPORT_LEN: usize = 15;
pub const STATUS_REPORT_LEN: usize = 15;

#[derive(Debug, Clone, Copy)]
pub struct TorqueCommandEncoder {
    max_torque_nm: f32,
    torque_constant: f32,
    sequence: u8,
}

impl TorqueCommandEncoder {
    pub fn new(max_torque_nm: f32) -> Self {
        Self {
            max_torque_nm: max_torque_nm.max(0.01),
            torque_constant: 0.1,
            sequence: 0,
        }
    }

    pub fn with_torque_constant(mut self, constant: f32) -> Self {
        self.torque_constant = constant;
        self
    }

    pub fn encode(&mut self, torque_nm: f32, out: &mut [u8; TORQUE_COMMAND_LEN]) -> usize {
        let torque_q8_8 = torque_to_q8_8(torque_nm, self.max_torque_nm);
        let cmd =
            SmCommand::new(self.sequence, SmCommandType::SetTorque).with_data(torque_q8_8 as i32);
        self.sequence = self.sequence.wrapping_add(1);
        encode_command(&cmd, out).unwrap_or(0)
    }

    pub fn encode_with_velocity(
        &mut self,
        torque_nm: f32,
        velocity_rpm: f32,
        out: &mut [u8; TORQUE_COMMAND_LEN],
    ) -> usize {
        let torque_q8_8 = torque_to_q8_8(torque_nm, self.max_torque_nm);
        let velocity_q8_8 = (velocity_rpm * 256.0 / 60.0) as i16;
        let combined = ((torque_q8_8 as i32) << 16) | (velocity_q8_8 as i32 & 0xFFFF);
        let cmd = SmCommand::new(self.sequence, SmCommandType::SetTorque).with_data(combined);
        self.sequence = self.sequence.wrapping_add(1);
        encode_command(&cmd, out).unwrap_or(0)
    }

    pub fn encode_zero(&mut self, out: &mut [u8; TORQUE_COMMAND_LEN]) -> usize {
        self.encode(0.0, out)
    }

    pub fn sequence(&self) -> u8 {
        self.sequence
    }
}

#[inline]
fn torque_to_q8_8(torque_nm: f32, max_torque_nm: f32) -> i16 {
    let normalized = (torque_nm / max_torque_nm).clamp(-1.0, 1.0);
    (normalized * 32767.0) as i16
}

pub fn build_set_zero_position(seq: u8) -> [u8; TORQUE_COMMAND_LEN] {
    let cmd = SmCommand::new(seq, SmCommandType::SetZero).with_data(0);
    let mut out = [0u8; TORQUE_COMMAND_LEN];
    encode_command(&cmd, &mut out).expect("set zero position command should never fail");
    out
}

pub fn build_device_enable(enable: bool, seq: u8) -> [u8; TORQUE_COMMAND_LEN] {
    let value = if enable { 1 } else { 0 };
    let cmd = SmCommand::new(seq, SmCommandType::SetParameter).with_param(0x1001, value);
    let mut out = [0u8; TORQUE_COMMAND_LEN];
    encode_command(&cmd, &mut out).expect("device enable command should never fail");
    out
}

pub fn build_get_parameter(param_addr: u16, seq: u8) -> [u8; TORQUE_COMMAND_LEN] {
    let cmd = SmCommand::new(seq, SmCommandType::GetParameter).with_param(param_addr, 0);
    let mut out = [0u8; TORQUE_COMMAND_LEN];
    encode_command(&cmd, &mut out).expect("get parameter command should never fail");
    out
}

pub fn build_set_parameter(param_addr: u16, value: i32, seq: u8) -> [u8; TORQUE_COMMAND_LEN] {
    let cmd = SmCommand::new(seq, SmCommandType::SetParameter).with_param(param_addr, value);
    let mut out = [0u8; TORQUE_COMMAND_LEN];
    encode_command(&cmd, &mut out).expect("set parameter command should never fail");
    out
}

pub fn build_get_status(seq: u8) -> [u8; TORQUE_COMMAND_LEN] {
    let cmd = SmCommand::new(seq, SmCommandType::GetStatus);
    let mut out = [0u8; TORQUE_COMMAND_LEN];
    encode_command(&cmd, &mut out).expect("get status command should never fail");
    out
}
