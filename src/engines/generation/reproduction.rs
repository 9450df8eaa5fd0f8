use crate::engines::generation::genome::{decode_component, encode_component};
use crate::engines::generation::operators::{crossover, mutate};
use crate::error::Result;
use crate::population::{Component, GenerationContext, Member};
use crate::types::{ComponentId, COMPONENT_COUNT};
use rand::Rng;

/// Breed two offspring from two parents, slot by slot: encode both parents' components, cross
/// them over, mutate each result, and decode into fresh components that keep the respective
/// parent's material. The parents' chance lists are annealed in place; offspring start with fresh
/// ones and are left undefined.
pub fn reproduce_pair<R: Rng>(
    left: &mut Member,
    right: &mut Member,
    ctx: &mut GenerationContext,
    rng: &mut R,
) -> Result<(Member, Member)> {
    let mut first = Vec::with_capacity(COMPONENT_COUNT);
    let mut second = Vec::with_capacity(COMPONENT_COUNT);

    for id in ComponentId::ALL {
        let (left_part, right_part) = (left.component_mut(id), right.component_mut(id));
        let mut left_genome = encode_component(left_part)?;
        let mut right_genome = encode_component(right_part)?;

        crossover(
            &mut left_genome,
            &mut right_genome,
            &mut left_part.crossover_chances,
            &mut right_part.crossover_chances,
            rng,
        )?;
        mutate(&mut left_genome, &mut left_part.mutate_chances, rng)?;
        mutate(&mut right_genome, &mut right_part.mutate_chances, rng)?;

        let mut left_child = Component::offspring(id, left_part.kind(), left_part.material_id(), rng);
        decode_component(&mut left_child, &left_genome)?;
        let mut right_child = Component::offspring(id, right_part.kind(), right_part.material_id(), rng);
        decode_component(&mut right_child, &right_genome)?;

        first.push(left_child);
        second.push(right_child);
    }

    Ok((
        Member::from_components(ctx.next_id(), ctx.newborn_age, first)?,
        Member::from_components(ctx.next_id(), ctx.newborn_age, second)?,
    ))
}

/// Two distinct mutable members of one slice.
pub fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> Option<(&mut T, &mut T)> {
    if i == j || i >= items.len() || j >= items.len() {
        return None;
    }
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
