use crate::constants::*;
use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// Which start pose a viewport width selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutClass {
    Mobile,
    Desktop,
}

impl LayoutClass {
    pub fn for_width(width: f32) -> Self {
        if width < MOBILE_BREAKPOINT_PX {
            LayoutClass::Mobile
        } else {
            LayoutClass::Desktop
        }
    }

    pub fn start_pose(self) -> CameraPose {
        match self {
            LayoutClass::Mobile => CameraPose {
                position: MOBILE_CAMERA_POSITION,
                target: MOBILE_CAMERA_TARGET,
            },
            LayoutClass::Desktop => CameraPose {
                position: DESKTOP_CAMERA_POSITION,
                target: DESKTOP_CAMERA_TARGET,
            },
        }
    }
}

/// CSS-pixel viewport plus the device pixel ratio reported by the browser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Device pixel ratio capped for fill-rate.
    pub fn pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO)
    }

    pub fn layout(&self) -> LayoutClass {
        LayoutClass::for_width(self.width)
    }

    /// Backing-store size in device pixels, never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let r = self.pixel_ratio();
        (
            ((self.width * r) as u32).max(1),
            ((self.height * r) as u32).max(1),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(viewport: &Viewport) -> Self {
        let pose = viewport.layout().start_pose();
        Self {
            position: pose.position,
            target: pose.target,
            fov_y: CAMERA_FOV_DEG.to_radians(),
            aspect: viewport.aspect(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    pub fn apply_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
            min_azimuth: ORBIT_MIN_AZIMUTH,
            max_azimuth: ORBIT_MAX_AZIMUTH,
        }
    }
}

/// Damped orbit around the camera target, Y up.
///
/// Input accumulates a spherical delta that `update` bleeds off by the damping
/// factor each frame, so the camera keeps gliding briefly after a drag ends.
/// Disabling the controls blocks new input but lets the glide finish.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enabled: bool,
    pub limits: OrbitLimits,
    pub damping: f32,
    delta_azimuth: f32,
    delta_polar: f32,
    zoom_scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            limits: OrbitLimits::default(),
            damping: ORBIT_DAMPING,
            delta_azimuth: 0.0,
            delta_polar: 0.0,
            zoom_scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Rotate by angles in radians; positive `left` swings the camera left.
    pub fn rotate(&mut self, left: f32, up: f32) {
        if !self.enabled {
            return;
        }
        self.delta_azimuth -= left;
        self.delta_polar -= up;
    }

    /// Zoom by wheel steps; positive steps move away from the target.
    pub fn zoom(&mut self, steps: f32) {
        if !self.enabled {
            return;
        }
        self.zoom_scale *= ORBIT_ZOOM_STEP.powf(-steps);
    }

    /// Drop any pending glide, e.g. after the pose was reset.
    pub fn stop(&mut self) {
        self.delta_azimuth = 0.0;
        self.delta_polar = 0.0;
        self.zoom_scale = 1.0;
    }

    pub fn update(&mut self, camera: &mut Camera) {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        azimuth += self.delta_azimuth * self.damping;
        polar += self.delta_polar * self.damping;
        self.delta_azimuth *= 1.0 - self.damping;
        self.delta_polar *= 1.0 - self.damping;

        let l = &self.limits;
        azimuth = azimuth.clamp(l.min_azimuth, l.max_azimuth);
        polar = polar.clamp(l.min_polar.max(1e-6), l.max_polar);
        let radius = (radius * self.zoom_scale).clamp(l.min_distance, l.max_distance);
        self.zoom_scale = 1.0;

        let (sin_p, cos_p) = polar.sin_cos();
        let (sin_a, cos_a) = azimuth.sin_cos();
        camera.position =
            camera.target + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * radius;
    }
}
