use crate::DeviceKind;

const DESKTOP: &[u8] = include_bytes!("../data/desktop_useragents.json");
const MOBILE: &[u8] = include_bytes!("../data/mobile_useragents.json");

/// Raw JSON of the catalog embedded for the given device.
pub(crate) const fn catalog_bytes(device: DeviceKind) -> &'static [u8] {
    match device {
        DeviceKind::Desktop => DESKTOP,
        DeviceKind::Mobile => MOBILE,
    }
}
