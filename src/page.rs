//! Page composition: turns [`PageContent`] into the reveal blocks of every section.
//!
//! Composition is the only place that knows which animation each element of the page
//! plays. The numbers in [`RevealPresets::default`] are the site's look.

use instant::Duration;

use crate::{
    content::PageContent,
    reveal::{
        BlockKey, Bounds, Pose, RevealAnimation, RevealController, RevealHandle, RevealOptions,
        RevealableBlock, StaggerGroup, VisibilitySource,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Experience,
    Skills,
    Projects,
    Education,
    Contact,
    Footer,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Hero,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Education,
        SectionKind::Contact,
        SectionKind::Footer,
    ];

    /// Anchor id of the section, also the first segment of every block key in it.
    pub fn id(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Education => "education",
            SectionKind::Contact => "contact",
            SectionKind::Footer => "footer",
        }
    }
}

/// Animation and observation settings shared by one kind of element.
#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub initial: Pose,
    pub duration: Duration,
    pub stagger: Duration,
    pub base: Duration,
    pub margin_px: f32,
}

impl Preset {
    fn new(initial: Pose, duration_secs: f32) -> Self {
        Self {
            initial,
            duration: Duration::from_secs_f32(duration_secs),
            stagger: Duration::ZERO,
            base: Duration::ZERO,
            margin_px: 0.0,
        }
    }

    fn stagger(mut self, secs: f32) -> Self {
        self.stagger = Duration::from_secs_f32(secs);
        self
    }

    fn base(mut self, secs: f32) -> Self {
        self.base = Duration::from_secs_f32(secs);
        self
    }

    fn margin(mut self, margin_px: f32) -> Self {
        self.margin_px = margin_px;
        self
    }

    pub fn animation(&self) -> RevealAnimation {
        RevealAnimation::new(self.initial, self.duration)
    }

    pub fn group(&self, name: impl Into<String>) -> StaggerGroup {
        StaggerGroup::new(name, self.stagger).with_base(self.base)
    }

    pub fn options(&self) -> RevealOptions {
        RevealOptions::margin(self.margin_px)
    }
}

/// Per-element presets for the whole page.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealPresets {
    pub header: Preset,
    /// `(initial, delay)` of each hero line, revealed on mount.
    pub hero_lines: Vec<(Pose, Duration)>,
    pub hero_duration: Duration,
    /// Experience cards slide in from alternating sides by this many px.
    pub experience_slide: f32,
    pub experience: Preset,
    pub skill_card: Preset,
    /// Chips, degrees, certifications, awards and contact links latch with their
    /// container, so their margins are unused.
    pub skill_chip: Preset,
    pub project: Preset,
    pub education_column: Preset,
    pub education_entry: Preset,
    pub certification: Preset,
    pub award: Preset,
    pub contact_panel: Preset,
    pub contact_link: Preset,
    pub footer: Preset,
}

impl Default for RevealPresets {
    fn default() -> Self {
        let secs = Duration::from_secs_f32;
        Self {
            header: Preset::new(Pose::offset(0.0, 30.0), 0.8),
            hero_lines: vec![
                (Pose::offset(0.0, 20.0), secs(0.0)),
                (Pose::offset(0.0, 30.0), secs(0.2)),
                (Pose::offset(-50.0, 0.0), secs(0.5)),
                (Pose::offset(50.0, 0.0), secs(0.5)),
                (Pose::offset(0.0, 20.0), secs(0.6)),
                (Pose::offset(0.0, 20.0), secs(0.7)),
                (Pose::offset(0.0, 20.0), secs(0.8)),
                (Pose::offset(0.0, 40.0), secs(1.0)),
                (Pose::hidden(), secs(1.5)),
            ],
            hero_duration: secs(0.8),
            experience_slide: 50.0,
            experience: Preset::new(Pose::hidden(), 0.8).stagger(0.2).margin(-100.0),
            skill_card: Preset::new(Pose::offset(0.0, 30.0).with_scale(0.95), 0.6)
                .stagger(0.1)
                .margin(-50.0),
            skill_chip: Preset::new(Pose::hidden().with_scale(0.8), 0.4).stagger(0.05),
            project: Preset::new(Pose::offset(0.0, 40.0).with_tilt(10.0), 0.7)
                .stagger(0.1)
                .margin(-50.0),
            education_column: Preset::new(Pose::offset(-30.0, 0.0), 0.8).margin(-50.0),
            education_entry: Preset::new(Pose::offset(0.0, 20.0), 0.6).stagger(0.2),
            certification: Preset::new(Pose::offset(0.0, 20.0), 0.6).stagger(0.1),
            award: Preset::new(Pose::offset(20.0, 0.0), 0.5)
                .stagger(0.1)
                .base(0.3),
            contact_panel: Preset::new(Pose::offset(0.0, 30.0), 0.8).margin(-50.0),
            contact_link: Preset::new(Pose::offset(0.0, 20.0), 0.6).stagger(0.1),
            footer: Preset::new(Pose::hidden(), 0.6).base(0.5),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlannedBlock {
    pub block: RevealableBlock,
    pub options: RevealOptions,
    /// Index of the container block in the same plan. The block latches with it.
    pub follows: Option<usize>,
}

/// Every reveal block of one section, in document order.
#[derive(Clone, Debug)]
pub struct SectionPlan {
    pub kind: SectionKind,
    pub blocks: Vec<PlannedBlock>,
}

impl SectionPlan {
    fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
        }
    }

    /// Returns the index of the pushed block.
    fn push(&mut self, block: RevealableBlock, options: RevealOptions) -> usize {
        self.blocks.push(PlannedBlock {
            block,
            options,
            follows: None,
        });
        self.blocks.len() - 1
    }

    /// Returns the index of the group's first block.
    fn push_group(&mut self, group: StaggerGroup, options: RevealOptions) -> usize {
        let first = self.blocks.len();
        group.into_blocks().into_iter().for_each(|block| {
            self.push(block, options);
        });
        first
    }

    /// Pushes a group that shares the observation of the block at `leader`.
    fn push_nested(&mut self, group: StaggerGroup, leader: usize) {
        for block in group.into_blocks() {
            self.blocks.push(PlannedBlock {
                block,
                options: RevealOptions::default(),
                follows: Some(leader),
            });
        }
    }

    fn header(&mut self, presets: &RevealPresets) {
        let key = BlockKey::indexed(self.kind.id(), "header", 0);
        self.push(
            RevealableBlock::new(key, presets.header.animation()),
            presets.header.options(),
        );
    }

    pub fn keys(&self) -> impl Iterator<Item = &BlockKey> {
        self.blocks.iter().map(|planned| planned.block.key())
    }

    /// Registers every block of the section, keeping document order.
    pub fn register<V: VisibilitySource>(
        &self,
        controller: &mut RevealController<V>,
    ) -> Vec<RevealHandle> {
        let mut handles = Vec::with_capacity(self.blocks.len());
        for planned in &self.blocks {
            let mut options = planned.options;
            if let Some(leader) = planned.follows.and_then(|i| handles.get(i).copied()) {
                options.follow = Some(leader);
            }
            handles.push(controller.register(planned.block.clone(), options));
        }
        handles
    }
}

/// Builds the reveal plan of the whole page, one [`SectionPlan`] per [`SectionKind`].
pub fn compose(content: &PageContent, presets: &RevealPresets) -> Vec<SectionPlan> {
    SectionKind::ALL
        .iter()
        .map(|kind| match kind {
            SectionKind::Hero => hero(presets),
            SectionKind::Experience => experience(content, presets),
            SectionKind::Skills => skills(content, presets),
            SectionKind::Projects => projects(content, presets),
            SectionKind::Education => education(content, presets),
            SectionKind::Contact => contact(content, presets),
            SectionKind::Footer => footer(content, presets),
        })
        .collect()
}

fn hero(presets: &RevealPresets) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionKind::Hero);
    for (index, (initial, delay)) in presets.hero_lines.iter().enumerate() {
        let animation = RevealAnimation::new(*initial, presets.hero_duration).with_delay(*delay);
        plan.push(
            RevealableBlock::new(BlockKey::indexed("hero", "line", index), animation),
            RevealOptions::on_mount(),
        );
    }
    plan
}

fn experience(content: &PageContent, presets: &RevealPresets) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionKind::Experience);
    plan.header(presets);
    let preset = &presets.experience;
    let mut cards = preset.group("experience/card");
    for index in 0..content.experience.len() {
        // even cards come in from the left, odd ones from the right
        let side = if index % 2 == 0 { -1.0 } else { 1.0 };
        let mut animation = preset.animation();
        animation.initial.x = side * presets.experience_slide;
        cards.push(BlockKey::indexed("experience", "card", index), animation);
    }
    plan.push_group(cards, preset.options());
    plan
}

fn skills(content: &PageContent, presets: &RevealPresets) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionKind::Skills);
    plan.header(presets);
    let mut cards = presets.skill_card.group("skills/card");
    let mut chips = Vec::with_capacity(content.skills.len());
    for (index, category) in content.skills.iter().enumerate() {
        let card = cards
            .push(
                BlockKey::indexed("skills", "card", index),
                presets.skill_card.animation(),
            )
            .clone();
        // chips cascade after their own card
        let mut group = StaggerGroup::new(card.key().as_str(), presets.skill_chip.stagger)
            .with_base(card.animation.delay);
        for chip in 0..category.skills.len() {
            group.push(card.key().child("chip", chip), presets.skill_chip.animation());
        }
        chips.push(group);
    }
    // cards first so they are registered (and triggered) before their chips
    let first_card = plan.push_group(cards, presets.skill_card.options());
    for (index, group) in chips.into_iter().enumerate() {
        plan.push_nested(group, first_card + index);
    }
    plan
}

fn projects(content: &PageContent, presets: &RevealPresets) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionKind::Projects);
    plan.header(presets);
    let mut cards = presets.project.group("projects/card");
    for index in 0..content.projects.len() {
        cards.push(
            BlockKey::indexed("projects", "card", index),
            presets.project.animation(),
        );
    }
    plan.push_group(cards, presets.project.options());
    plan
}

fn education(content: &PageContent, presets: &RevealPresets) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionKind::Education);
    plan.header(presets);

    let column = &presets.education_column;
    let mut degrees = presets.education_entry.group("education/degree");
    for index in 0..content.education.len() {
        degrees.push(
            BlockKey::indexed("education", "degree", index),
            presets.education_entry.animation(),
        );
    }
    let leader = plan.push(
        RevealableBlock::new(BlockKey::indexed("education", "column", 0), column.animation()),
        column.options(),
    );
    plan.push_nested(degrees, leader);

    let mut mirrored = column.animation();
    mirrored.initial.x = -mirrored.initial.x;
    let mut certifications = presets.certification.group("education/certification");
    for index in 0..content.certifications.len() {
        certifications.push(
            BlockKey::indexed("education", "certification", index),
            presets.certification.animation(),
        );
    }
    let leader = plan.push(
        RevealableBlock::new(BlockKey::indexed("education", "column", 1), mirrored.clone()),
        column.options(),
    );
    plan.push_nested(certifications, leader);

    let mut awards = presets.award.group("education/award");
    for index in 0..content.awards.len() {
        awards.push(
            BlockKey::indexed("education", "award", index),
            presets.award.animation(),
        );
    }
    let leader = plan.push(
        RevealableBlock::new(
            BlockKey::indexed("education", "column", 2),
            mirrored.with_delay(Duration::from_secs_f32(0.2)),
        ),
        column.options(),
    );
    plan.push_nested(awards, leader);
    plan
}

fn contact(content: &PageContent, presets: &RevealPresets) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionKind::Contact);
    plan.header(presets);
    let panel = &presets.contact_panel;
    let leader = plan.push(
        RevealableBlock::new(BlockKey::indexed("contact", "panel", 0), panel.animation()),
        panel.options(),
    );
    let mut links = presets.contact_link.group("contact/link");
    for index in 0..content.contact.len() {
        links.push(
            BlockKey::indexed("contact", "link", index),
            presets.contact_link.animation(),
        );
    }
    plan.push_nested(links, leader);
    plan.push(
        RevealableBlock::new(
            BlockKey::indexed("contact", "panel", 1),
            panel.animation().with_delay(Duration::from_secs_f32(0.5)),
        ),
        panel.options(),
    );
    plan
}

fn footer(content: &PageContent, presets: &RevealPresets) -> SectionPlan {
    let mut plan = SectionPlan::new(SectionKind::Footer);
    let mut lines = presets.footer.group("footer/line");
    for index in 0..content.footer.lines.len().max(1) {
        lines.push(
            BlockKey::indexed("footer", "line", index),
            presets.footer.animation(),
        );
    }
    plan.push_group(lines, RevealOptions::on_mount());
    plan
}

/// Lays every block out top to bottom, `row_height` px each with `gap` px between
/// sections. Good enough for geometric visibility sources; the browser has real layout.
pub fn stack_bounds(plans: &mut [SectionPlan], width: f32, row_height: f32, gap: f32) {
    let mut y = 0.0;
    for plan in plans.iter_mut() {
        for planned in plan.blocks.iter_mut() {
            planned.block.bounds = Bounds::new(0.0, y, width, row_height);
            y += row_height;
        }
        y += gap;
    }
}
