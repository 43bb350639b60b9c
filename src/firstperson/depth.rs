/// Corrected wall distance per screen column. Empty columns stay infinitely far.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
	depths: Vec<f32>
}

impl DepthBuffer {
	pub fn new(columns: u32) -> Self {
		Self { depths: vec![f32::INFINITY; columns as usize] }
	}

	pub fn len(&self) -> usize {
		self.depths.len()
	}

	pub fn is_empty(&self) -> bool {
		self.depths.is_empty()
	}

	/// Forgets the previous frame. Also adapts to a changed ray count.
	pub fn reset(&mut self, columns: u32) {
		self.depths.clear();
		self.depths.resize(columns as usize, f32::INFINITY);
	}

	/// Stores `distance` only if it is strictly nearer than what the column holds.
	pub fn write(&mut self, column: usize, distance: f32) -> bool {
		match self.depths.get_mut(column) {
			Some(depth) if distance < *depth => {
				*depth = distance;
				true
			},
			_ => false
		}
	}

	pub fn get(&self, column: usize) -> Option<f32> {
		self.depths.get(column).copied()
	}

	/// True when something at `distance` is visible in front of the column's wall.
	pub fn is_visible(&self, column: usize, distance: f32) -> bool {
		self.get(column).is_some_and(|depth| distance < depth)
	}

	pub fn as_slice(&self) -> &[f32] {
		&self.depths
	}
}


#[test]
fn only_nearer_writes_stick() {
	let mut depth = DepthBuffer::new(3);
	assert!(depth.write(1, 40.0));
	assert!(!depth.write(1, 50.0));
	assert!(!depth.write(1, 40.0));
	assert!(depth.write(1, 30.0));
	assert!(!depth.write(9, 1.0));
	assert_eq!(depth.as_slice(), &[f32::INFINITY, 30.0, f32::INFINITY]);
}

#[test]
fn empty_columns_never_occlude() {
	let mut depth = DepthBuffer::new(2);
	depth.write(0, 10.0);
	assert!(depth.is_visible(1, 1.0e30));
	assert!(!depth.is_visible(0, 10.0));
	assert!(depth.is_visible(0, 9.9));
	assert!(!depth.is_visible(2, 1.0));
	depth.reset(2);
	assert!(depth.is_visible(0, 500.0));
}
