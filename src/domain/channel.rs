// Channel domain model

#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: String,
    pub topic: String,
    pub label: String,
    pub color: String,
}

impl Channel {
    pub fn new(id: String, topic: String, label: String, color: String) -> Self {
        Self {
            id,
            topic,
            label,
            color,
        }
    }

    /// Translucent variant of the display color used to fill under the line.
    pub fn fill_color(&self) -> String {
        // Convert "rgb(255, 99, 132)" to "rgba(255, 99, 132, 0.2)"
        self.color
            .replacen("rgb", "rgba", 1)
            .replacen(')', ", 0.2)", 1)
    }
}
