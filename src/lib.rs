pub mod setup;

pub mod calendar {
    pub mod holidaysource;
    pub mod chinaholidaysource;
}

pub mod sensor {
    pub mod host;
    pub mod snapshot;
    pub mod dateclassifier;
    pub mod scheduledsnapshot;
}

pub mod time {
    pub mod clock;
    pub mod utility;
}
