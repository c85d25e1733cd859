use hdf5::types::VarLenUnicode;
use ndarray::Array2;

// ---------------------------------------------------------------------------
// Synthetic DAS recording generator
// ---------------------------------------------------------------------------
//
// Writes `sample_das.h5`: two channel waterfalls (time frames × distance
// bins) of fibre noise with a vibration event injected partway along the
// fibre, plus the root attributes of a real acquisition.

const PRF_HZ: usize = 100;
const CAPTURE_S: usize = 50;
const SAMPLES: usize = 1500;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Fibre noise with a tone burst centred on `event_bin`: a 12 Hz
/// vibration whose amplitude falls off with distance from the event.
fn generate_channel(rng: &mut SimpleRng, event_bin: usize, phase_offset: f64) -> Array2<f32> {
    let frames = PRF_HZ * CAPTURE_S;
    let tone_hz = 12.0;

    Array2::from_shape_fn((frames, SAMPLES), |(frame, bin)| {
        let noise = rng.gauss(0.0, 1.0);

        let distance = (bin as f64 - event_bin as f64).abs();
        let envelope = (-distance / 25.0).exp();
        let t = frame as f64 / PRF_HZ as f64;
        let tone = (2.0 * std::f64::consts::PI * tone_hz * t + phase_offset).sin();

        (noise + 4.0 * envelope * tone) as f32
    })
}

fn write_str_attr(file: &hdf5::File, name: &str, value: &str) -> hdf5::Result<()> {
    let value: VarLenUnicode = value.parse().unwrap();
    file.new_attr::<VarLenUnicode>()
        .create(name)?
        .write_scalar(&value)
}

fn main() -> hdf5::Result<()> {
    let mut rng = SimpleRng::new(42);

    let ch_a = generate_channel(&mut rng, 900, 0.0);
    let ch_b = generate_channel(&mut rng, 900, std::f64::consts::FRAC_PI_2);

    let output_path = "sample_das.h5";
    let file = hdf5::File::create(output_path)?;

    file.new_dataset_builder().with_data(&ch_a).create("Ch_A")?;
    file.new_dataset_builder().with_data(&ch_b).create("Ch_B")?;

    file.new_attr::<f64>()
        .create("Fiber_len(m)")?
        .write_scalar(&1000.0)?;
    file.new_attr::<i64>()
        .create("Capture_duration(s)")?
        .write_scalar(&(CAPTURE_S as i64))?;
    file.new_attr::<i64>()
        .create("Trig_PRF(Hz)")?
        .write_scalar(&(PRF_HZ as i64))?;
    file.new_attr::<f64>()
        .create("Sampling rate(MSPS)")?
        .write_scalar(&10.0)?;
    file.new_attr::<i64>()
        .create("Trig_pulse_width(ns)")?
        .write_scalar(&100i64)?;
    file.new_attr::<i64>()
        .create("Trigger_delay(ns)")?
        .write_scalar(&0i64)?;
    write_str_attr(&file, "DAS hardware", "IITM DAS - I, Q")?;

    println!(
        "Wrote {} frames x {} samples per channel to {output_path}",
        PRF_HZ * CAPTURE_S,
        SAMPLES
    );
    Ok(())
}
