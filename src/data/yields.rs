use super::resource::Resource;

/// the yield bundle of a site or a whole layout: the three scalar
/// totals plus the precious resource quantities in deci-percent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceYield {
    pub production: u32,
    pub revenue: u32,
    pub storage: u32,
    pub resources: [u32; Resource::COUNT],
}

impl ResourceYield {
    pub fn new(
        production: u32,
        revenue: u32,
        storage: u32,
        resources: [u32; Resource::COUNT],
    ) -> Self {
        Self {
            production,
            revenue,
            storage,
            resources,
        }
    }

    /// elementwise accumulation of another site's contribution
    pub fn absorb(&mut self, other: &Self) {
        self.production += other.production;
        self.revenue += other.revenue;
        self.storage += other.storage;
        for (lhs, rhs) in self.resources.iter_mut().zip(other.resources.iter()) {
            *lhs += rhs;
        }
    }
}
