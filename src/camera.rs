//! Camera for ray generation and scene rendering

use std::hash::{DefaultHasher, Hash, Hasher};

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::random;
use crate::ray::Ray;

/// RGB color type using Vec3A for SIMD optimization.
type Color = Vec3A;

/// Camera for ray generation and scene rendering.
///
/// Thin-lens camera model with anti-aliasing via multi-sampling, defocus
/// blur, and a shutter-time draw per ray for motion blur. Configure the
/// public fields, then call [`Camera::render`].
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over image height
    pub aspect_ratio: f32,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,
    /// Vertical field of view in degrees (default: 90)
    pub vfov: f32,
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Variation angle of rays through each pixel (defocus blur control);
    /// zero or negative disables lens sampling
    pub defocus_angle: f32,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f32,
    /// Base seed for the per-pixel random streams.
    ///
    /// `Some` makes renders bit-reproducible across runs and thread
    /// schedules; `None` seeds every pixel from entropy.
    pub seed: Option<u64>,

    /// Rendered image height, derived from width and aspect ratio
    image_height: u32,
    /// Camera position in world space (same as lookfrom)
    center: Vec3A,
    /// World position of the top-left pixel (pixel 0,0)
    pixel00_loc: Vec3A,
    /// Offset vector from pixel to pixel horizontally (right direction)
    pixel_delta_u: Vec3A,
    /// Offset vector from pixel to pixel vertically (down direction)
    pixel_delta_v: Vec3A,
    /// Color scale factor for a sum of pixel samples (1.0 / samples_per_pixel)
    pixel_samples_scale: f32,
    /// Camera frame basis vector pointing right (u)
    u: Vec3A,
    /// Camera frame basis vector pointing up (v)
    v: Vec3A,
    /// Camera frame basis vector pointing opposite view direction (w)
    w: Vec3A,
    /// Defocus disk horizontal radius vector
    defocus_disk_u: Vec3A,
    /// Defocus disk vertical radius vector
    defocus_disk_v: Vec3A,
    /// Flag to track whether camera parameters have been calculated
    initialized: bool,
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: 400 pixels wide at 16:9, 50 samples per pixel, 90° FOV,
    /// no defocus blur, entropy-seeded.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 50,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Vec3A::new(0.0, 0.0, 0.0),
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
            seed: None,
            image_height: 0,
            center: Vec3A::ZERO,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            pixel_samples_scale: 1.0,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            w: Vec3A::ZERO,
            defocus_disk_u: Vec3A::ZERO,
            defocus_disk_v: Vec3A::ZERO,
            initialized: false,
        }
    }

    /// Renders the scene by path tracing.
    ///
    /// Generates rays through each pixel, traces them through the scene,
    /// and accumulates color samples. Pixels are processed in parallel,
    /// each with its own random stream.
    ///
    /// Returns an HDR image buffer with linear f32 RGB values; quantization
    /// is the output writers' concern.
    pub fn render(&mut self, world: &dyn Hittable) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        self.initialize();

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);

        info!(
            "Generating {}x{} image using {} CPU cores...",
            self.image_width,
            self.image_height,
            rayon::current_num_threads()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(self.image_width as u64 * self.image_height as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        // Parallel pixel processing using Rayon; each pixel owns its random stream
        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let mut rng = self.pixel_rng(i, j);
            let mut pixel_color = Color::ZERO;

            // Sample multiple rays per pixel for anti-aliasing
            for _sample in 0..self.samples_per_pixel {
                let r = self.get_ray(i, j, &mut rng);
                pixel_color += self.ray_color(&r, world, &mut rng);
            }

            // Average the samples
            pixel_color *= self.pixel_samples_scale;
            *pixel = Rgb([pixel_color.x, pixel_color.y, pixel_color.z]);
            pb.inc(1);
        });

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }

    /// Initialize camera parameters based on current settings.
    ///
    /// Derives the image height, camera coordinate system and viewport for
    /// ray generation. Called lazily by render(); idempotent.
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        // Degenerate configuration clamps to the smallest valid render
        self.image_width = self.image_width.max(1);
        self.samples_per_pixel = self.samples_per_pixel.max(1);
        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);

        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;

        // Set camera center to lookfrom position
        self.center = self.lookfrom;

        // Determine viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        // The actual width/height ratio, not aspect_ratio: both are integers
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        self.w = (self.lookfrom - self.lookat).normalize(); // Points opposite view direction
        self.u = self.vup.cross(self.w).normalize(); // Points to camera right
        self.v = self.w.cross(self.u); // Points to camera up

        // Calculate the vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u; // Vector across viewport horizontal edge
        let viewport_v = viewport_height * -self.v; // Vector down viewport vertical edge

        // Calculate the horizontal and vertical delta vectors from pixel to pixel
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Calculate the location of the upper left pixel
        let viewport_upper_left =
            self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate the camera defocus disk basis vectors
        let defocus_radius = self.focus_dist * (self.defocus_angle.to_radians() / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;
    }

    /// Build the random stream for one pixel.
    ///
    /// With a base seed the stream depends only on (seed, i, j), making the
    /// render reproducible; otherwise each pixel draws a fresh entropy seed.
    fn pixel_rng(&self, i: u32, j: u32) -> ChaCha20Rng {
        match self.seed {
            Some(seed) => {
                let mut hasher = DefaultHasher::new();
                (seed, i, j).hash(&mut hasher);
                ChaCha20Rng::seed_from_u64(hasher.finish())
            }
            None => ChaCha20Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Generate a ray through a pixel with random sampling.
    ///
    /// Samples within the pixel for anti-aliasing, optionally from the
    /// defocus disk for depth-of-field blur, and draws the shutter instant
    /// the ray sees moving geometry at.
    fn get_ray(&self, i: u32, j: u32, rng: &mut impl Rng) -> Ray {
        let offset = self.sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f32 + offset.x) * self.pixel_delta_u)
            + ((j as f32 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        let ray_direction = pixel_sample - ray_origin;
        let ray_time = random::random_f32(rng);

        Ray::with_time(ray_origin, ray_direction, ray_time)
    }

    /// Generate random offset within [-0.5, 0.5] square for pixel sampling.
    fn sample_square(&self, rng: &mut impl Rng) -> Vec3A {
        Vec3A::new(
            random::random_f32(rng) - 0.5,
            random::random_f32(rng) - 0.5,
            0.0,
        )
    }

    /// Sample random point on the defocus disk for depth-of-field blur.
    fn defocus_disk_sample(&self, rng: &mut impl Rng) -> Vec3A {
        let p = random::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Trace a ray and compute its color contribution.
    ///
    /// Follows the ray through at most `max_depth` bounces, carrying the
    /// product of every attenuation collected along the chain. Terminal
    /// states: a scene miss pays out the background through the accumulated
    /// product; absorption and an exhausted bounce budget are black.
    fn ray_color(&self, r: &Ray, world: &dyn Hittable, rng: &mut impl Rng) -> Color {
        let mut ray = *r;
        let mut attenuation = Color::ONE;

        for _bounce in 0..self.max_depth {
            // Lower bound 0.001 avoids self-intersection at the departure point
            match world.hit(&ray, Interval::new(0.001, f32::INFINITY)) {
                Some(rec) => match rec.material.scatter(&ray, &rec, rng) {
                    Some((color, scattered)) => {
                        attenuation *= color;
                        ray = scattered;
                    }
                    None => return Color::ZERO,
                },
                None => return attenuation * background(&ray),
            }
        }

        // Bounce budget exhausted, no more light is gathered
        Color::ZERO
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Background gradient: a vertical lerp from white up to sky blue,
/// independent of scene content.
fn background(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use crate::material::Material;
    use crate::output;
    use crate::sphere::Sphere;

    fn two_sphere_world() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -1.0),
            0.5,
            Material::Lambertian {
                albedo: Vec3A::splat(0.5),
            },
        )));
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, -100.5, -1.0),
            100.0,
            Material::Lambertian {
                albedo: Vec3A::splat(0.5),
            },
        )));
        world
    }

    fn test_camera(samples: u32, depth: u32) -> Camera {
        let mut camera = Camera::new();
        camera.aspect_ratio = 16.0 / 9.0;
        camera.image_width = 400;
        camera.samples_per_pixel = samples;
        camera.max_depth = depth;
        camera.focus_dist = 1.0;
        camera.seed = Some(42);
        camera
    }

    #[test]
    fn zero_depth_is_black() {
        let world = two_sphere_world();
        let mut camera = test_camera(1, 0);
        camera.initialize();

        let mut rng = camera.pixel_rng(200, 112);
        let ray = camera.get_ray(200, 112, &mut rng);

        assert_eq!(camera.ray_color(&ray, &world, &mut rng), Vec3A::ZERO);
    }

    #[test]
    fn zero_defocus_rays_share_the_camera_center() {
        let mut camera = test_camera(1, 1);
        camera.defocus_angle = 0.0;
        camera.initialize();

        let mut rng = camera.pixel_rng(10, 10);
        for _ in 0..32 {
            let ray = camera.get_ray(10, 10, &mut rng);
            assert_eq!(ray.origin, camera.center);
        }
    }

    #[test]
    fn height_is_derived_and_clamped() {
        let mut camera = Camera::new();
        camera.image_width = 400;
        camera.aspect_ratio = 16.0 / 9.0;
        camera.initialize();
        assert_eq!(camera.image_height, 225);

        let mut flat = Camera::new();
        flat.image_width = 10;
        flat.aspect_ratio = 1000.0;
        flat.initialize();
        assert_eq!(flat.image_height, 1);
    }

    #[test]
    fn seeded_pixel_streams_reproduce() {
        let camera = test_camera(4, 8);

        let mut a = camera.pixel_rng(3, 5);
        let mut b = camera.pixel_rng(3, 5);
        let mut other = camera.pixel_rng(5, 3);

        let first: f32 = a.random();
        assert_eq!(first, b.random::<f32>());
        assert_ne!(first, other.random::<f32>());
    }

    #[test]
    fn sky_pixels_match_the_background_gradient() {
        let world = two_sphere_world();
        let mut camera = test_camera(1, 1);
        let image = camera.render(&world);

        assert_eq!(image.width(), 400);
        assert_eq!(image.height(), 225);

        // Replay the top-left pixel's random stream to rebuild its one ray
        let mut rng = camera.pixel_rng(0, 0);
        let ray = camera.get_ray(0, 0, &mut rng);
        assert!(
            world
                .hit(&ray, Interval::new(0.001, f32::INFINITY))
                .is_none(),
            "top-left ray must miss both spheres"
        );

        let expected = output::to_rgb8(background(&ray));
        let pixel = image.get_pixel(0, 0);
        let rendered = output::to_rgb8(Vec3A::new(pixel[0], pixel[1], pixel[2]));

        assert_eq!(rendered, expected);
    }

    #[test]
    fn ppm_header_matches_derived_dimensions() {
        let world = two_sphere_world();
        let mut camera = test_camera(1, 1);
        let image = camera.render(&world);

        let mut buffer = Vec::new();
        output::write_ppm(&image, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("P3\n400 225\n255\n"));
        assert_eq!(text.lines().count(), 3 + 400 * 225);
    }
}
