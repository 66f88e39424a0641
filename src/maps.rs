use crate::models::Location;

/// Link that opens `location` in the device's own maps app.
pub fn native_map_url(location: &Location, user_agent: &str) -> String {
    let Location { coordinates, .. } = location;
    let apple = ["iPad", "iPhone", "iPod"]
        .iter()
        .any(|device| user_agent.contains(device));

    if apple {
        format!("https://maps.apple.com/?q={},{}", coordinates.lat, coordinates.lng)
    } else {
        format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            coordinates.lat, coordinates.lng
        )
    }
}
