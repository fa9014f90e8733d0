//! SimpleMotion V2 device types: models, categories, and device identity.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmDeviceCategory {
    Wheelbase,
    ServoDrive,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmDeviceIdentity {
    pub product_id: u16,
    pub name: &'static str,
    pub category: SmDeviceCategory,
    pub supports_ffb: bool,
    pub max_torque_nm: Option<f32>,
    pub max_rpm: Option<u32>,
}

pub fn identify_device(product_id: u16) -> SmDeviceIdentity {
    match product_id {
        0x6050 => SmDeviceIdentity {
            product_id,
            name: "Simucube 1 / IONI Servo Drive",
            category: SmDeviceCategory::Wheelbase,
            supports_ffb: true,
            max_torque_nm: Some(15.0),
            max_rpm: Some(10000),
        },
        0x6051 => SmDeviceIdentity {
            product_id,
            name: "Simucube 2 / IONI Premium Servo Drive",
            category: SmDeviceCategory::Wheelbase,
            supports_ffb: true,
            max_torque_nm: Some(35.0),
            max_rpm: Some(15000),
        },
        0x6052 => SmDeviceIdentity {
            product_id,
            name: "Simucube Sport / ARGON Servo Drive",
            category: SmDeviceCategory::Wheelbase,
            supports_ffb: true,
            max_torque_nm: Some(10.0),
            max_rpm: Some(8000),
        },
        _ => SmDeviceIdentity {
            product_id,
            name: "Unknown SimpleMotion Device",
            category: SmDeviceCategory::Unknown,
            supports_ffb: false,
            max_torque_nm: None,
            max_rpm: None,
        },
    }
}

pub fn is_wheelbase_product(product_id: u16) -> bool {
    matches!(
        identify_device(product_id).category,
        SmDeviceCategory::Wheelbase
    )
}

pub fn sm_device_identity(product_id: u16) -> SmDeviceIdentity {
    identify_device(product_id)
}
