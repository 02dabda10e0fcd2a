pub type TouchId = i64;

/// Upper bound on touch points carried in a single emitted touch list.
pub const MAX_TOUCH_POINTS: usize = 10;

pub type TouchList = heapless::Vec<TouchSample, MAX_TOUCH_POINTS>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: TouchPoint) -> Offset {
        Offset {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

/// Snapshot of one touch point at one instant, captured by value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchSample {
    pub identifier: TouchId,
    pub screen: TouchPoint,
    pub client: TouchPoint,
    pub page: TouchPoint,
}

impl TouchSample {
    /// Sample whose screen, client and page coordinates coincide.
    pub const fn at(identifier: TouchId, x: f64, y: f64) -> Self {
        let point = TouchPoint::new(x, y);
        Self {
            identifier,
            screen: point,
            client: point,
            page: point,
        }
    }

    pub fn offset_from(&self, start: &TouchSample) -> Offset {
        self.client.offset_from(start.client)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// One touch point as delivered by the host, together with the raw element
/// it landed on.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact<T> {
    pub sample: TouchSample,
    pub target: T,
}

impl<T> Contact<T> {
    pub fn new(sample: TouchSample, target: T) -> Self {
        Self { sample, target }
    }

    pub fn identifier(&self) -> TouchId {
        self.sample.identifier
    }
}

pub(crate) fn touch_list<T>(contacts: &[Contact<T>]) -> TouchList {
    let mut list = TouchList::new();
    for contact in contacts {
        if list.push(contact.sample).is_err() {
            log::warn!(
                "touch list overflow: {} contacts, keeping {}",
                contacts.len(),
                MAX_TOUCH_POINTS
            );
            break;
        }
    }
    list
}

pub(crate) fn find_sample<T>(contacts: &[Contact<T>], id: TouchId) -> Option<TouchSample> {
    contacts
        .iter()
        .find(|contact| contact.identifier() == id)
        .map(|contact| contact.sample)
}
