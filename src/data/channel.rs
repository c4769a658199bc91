// ---------------------------------------------------------------------------
// Sensor channels
// ---------------------------------------------------------------------------

/// The two sensor groups plotted together in combined mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelGroup {
    Accelerometer,
    Gyroscope,
}

impl ChannelGroup {
    pub const ALL: [ChannelGroup; 2] = [ChannelGroup::Accelerometer, ChannelGroup::Gyroscope];

    /// Measured quantity, used for the y axis and the chart title.
    pub fn quantity(self) -> &'static str {
        match self {
            ChannelGroup::Accelerometer => "Acceleration",
            ChannelGroup::Gyroscope => "Gyrometer",
        }
    }

    pub fn channels(self) -> [Channel; 3] {
        match self {
            ChannelGroup::Accelerometer => [Channel::AccelX, Channel::AccelY, Channel::AccelZ],
            ChannelGroup::Gyroscope => [Channel::GyroX, Channel::GyroY, Channel::GyroZ],
        }
    }
}

/// One of the six fixed IMU columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    AccelX,
    AccelY,
    AccelZ,
    GyroX,
    GyroY,
    GyroZ,
}

impl Channel {
    /// Plot order in separate mode.
    pub const ALL: [Channel; 6] = [
        Channel::AccelX,
        Channel::AccelY,
        Channel::AccelZ,
        Channel::GyroX,
        Channel::GyroY,
        Channel::GyroZ,
    ];

    /// Column name in the source table.
    pub fn column(self) -> &'static str {
        match self {
            Channel::AccelX => "accel_x",
            Channel::AccelY => "accel_y",
            Channel::AccelZ => "accel_z",
            Channel::GyroX => "gyr_x",
            Channel::GyroY => "gyr_y",
            Channel::GyroZ => "gyr_z",
        }
    }

    /// Human readable series name.
    pub fn name(self) -> &'static str {
        match self {
            Channel::AccelX => "Accel X",
            Channel::AccelY => "Accel Y",
            Channel::AccelZ => "Accel Z",
            Channel::GyroX => "Gyro X",
            Channel::GyroY => "Gyro Y",
            Channel::GyroZ => "Gyro Z",
        }
    }

    /// Spatial axis (0 = X, 1 = Y, 2 = Z).
    pub fn axis(self) -> usize {
        match self {
            Channel::AccelX | Channel::GyroX => 0,
            Channel::AccelY | Channel::GyroY => 1,
            Channel::AccelZ | Channel::GyroZ => 2,
        }
    }
}
